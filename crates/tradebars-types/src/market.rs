//! Market symbols.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::MarketParseError;

/// Separator between base and quote asset in a market symbol.
pub const SEPARATOR: char = '-';

/// A tradable market such as `XDG-USDT`.
///
/// The user-facing symbol separates base and quote with [`SEPARATOR`]; the
/// exchange wire format uses the concatenated [`pair`](Self::pair).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Market {
    symbol: String,
}

impl Market {
    /// Builds a market from its base and quote asset.
    #[must_use]
    pub fn from_parts(base: &str, quote: &str) -> Self {
        Self {
            symbol: format!("{base}{SEPARATOR}{quote}"),
        }
    }

    /// Returns the symbol as given, separator included.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the wire pair name with every separator removed.
    #[must_use]
    pub fn pair(&self) -> String {
        self.symbol.replace(SEPARATOR, "")
    }

    /// Returns the base asset, or the whole symbol if it has no separator.
    #[must_use]
    pub fn base(&self) -> &str {
        self.symbol
            .split_once(SEPARATOR)
            .map_or(self.symbol.as_str(), |(base, _)| base)
    }

    /// Returns the quote asset, if the symbol has a separator.
    #[must_use]
    pub fn quote(&self) -> Option<&str> {
        self.symbol.split_once(SEPARATOR).map(|(_, quote)| quote)
    }

    /// Returns a copy of this market with the quote asset replaced.
    #[must_use]
    pub fn with_quote(&self, quote: &str) -> Self {
        Self::from_parts(self.base(), quote)
    }

    /// Returns a copy of this market with the base asset replaced.
    #[must_use]
    pub fn with_base(&self, base: &str) -> Self {
        self.quote().map_or_else(
            || Self {
                symbol: base.to_string(),
            },
            |quote| Self::from_parts(base, quote),
        )
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.symbol)
    }
}

impl FromStr for Market {
    type Err = MarketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = s.trim();
        if symbol.is_empty() {
            return Err(MarketParseError::Empty);
        }
        if let Some(ch) = symbol
            .chars()
            .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, SEPARATOR | '.' | '_')))
        {
            return Err(MarketParseError::InvalidCharacter {
                symbol: symbol.to_string(),
                ch,
            });
        }
        Ok(Self {
            symbol: symbol.to_string(),
        })
    }
}

impl TryFrom<String> for Market {
    type Error = MarketParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Market> for String {
    fn from(market: Market) -> Self {
        market.symbol
    }
}
