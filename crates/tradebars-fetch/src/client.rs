//! HTTP client for the Kraken and Binance public APIs.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::parse::parse_trades;
use crate::url::{BINANCE_API_URL, KRAKEN_API_URL, trades_url};
use crate::{SourceError, TradePage, TradeSource};

/// Configuration for the exchange client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Kraken REST API.
    pub kraken_url: String,
    /// Base URL of the Binance product listing API.
    pub binance_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            kraken_url: KRAKEN_API_URL.to_string(),
            binance_url: BINANCE_API_URL.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: format!("tradebars/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client for the exchange endpoints tradebars uses.
#[derive(Debug, Clone)]
pub struct ExchangeClient {
    client: Client,
    config: ClientConfig,
}

impl ExchangeClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches `url` and returns the body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Status`] for any non-success status; these are
    /// never retried.
    pub async fn get(&self, url: &str) -> Result<Bytes, SourceError> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl TradeSource for ExchangeClient {
    async fn fetch_page(&self, pair: &str, since: f64) -> Result<TradePage, SourceError> {
        let url = trades_url(&self.config.kraken_url, pair, since);
        let body = self.get(&url).await?;
        parse_trades(&body, pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.kraken_url, "https://api.kraken.com");
        assert_eq!(config.binance_url, "https://www.binance.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.user_agent.starts_with("tradebars/"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = ExchangeClient::with_defaults();
        assert!(client.is_ok());
    }
}
