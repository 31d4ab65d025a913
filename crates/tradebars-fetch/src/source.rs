//! The trade source seam.

use async_trait::async_trait;
use thiserror::Error;
use tradebars_types::Trade;

use crate::ParseError;

/// One page of trade history.
#[derive(Debug, Clone, PartialEq)]
pub struct TradePage {
    /// Trades in the order the source returned them.
    pub trades: Vec<Trade>,
    /// Cursor to request the next page with, in seconds since the epoch.
    pub next_cursor: f64,
}

impl TradePage {
    /// Creates a new page.
    #[must_use]
    pub const fn new(trades: Vec<Trade>, next_cursor: f64) -> Self {
        Self {
            trades,
            next_cursor,
        }
    }

    /// Returns true if the page holds no trades.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Returns the number of trades on the page.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.trades.len()
    }
}

/// Errors raised while fetching trade pages.
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Server error: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Parse(#[from] ParseError),

    /// The source reported error codes that are not classified as transient.
    #[error("Source rejected request: {}", codes.join(", "))]
    Rejected {
        /// Error codes as reported by the source.
        codes: Vec<String>,
    },

    /// A transient error persisted through every retry attempt.
    #[error("Source still failing after {attempts} attempts: {}", codes.join(", "))]
    Transient {
        /// Error codes of the last attempt.
        codes: Vec<String>,
        /// Number of attempts made.
        attempts: u32,
    },
}

impl SourceError {
    /// Returns true if the error came from a failed retry budget rather than
    /// an immediate rejection.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// A paginated history of trades for one market.
#[async_trait]
pub trait TradeSource: Send + Sync {
    /// Fetches the page of trades for `pair` starting at `since` seconds.
    ///
    /// Error codes reported inside a successful HTTP response surface as
    /// [`SourceError::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the source rejects it.
    async fn fetch_page(&self, pair: &str, since: f64) -> Result<TradePage, SourceError>;
}
