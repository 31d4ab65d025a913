//! Error types for tradebars core types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Error returned when a date string matches none of the accepted formats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// The input is not in any supported format.
    #[error(
        "Malformed date '{0}', expected YYYY-MM-DD, YYYY-MM-DDTHH:MM, YYYY-MM-DDTHH:MM:SS, \
         YYYY-MM-DDTHH:MM:SSZ or YYYY-MM-DDTHH:MM:SS.ffffffZ"
    )]
    Malformed(String),
}

/// Error for invalid aggregation windows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The window end is not after its start.
    #[error("Invalid window: {begin} is not before {end}")]
    Empty {
        /// The window start.
        begin: DateTime<Utc>,
        /// The window end.
        end: DateTime<Utc>,
    },

    /// The window end falls outside the representable date range.
    #[error("Window starting at {0} overflows the supported date range")]
    Overflow(DateTime<Utc>),
}

/// Error for market symbols that cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketParseError {
    /// The symbol is empty.
    #[error("Market symbol is empty")]
    Empty,

    /// The symbol contains a character outside `[A-Za-z0-9._-]`.
    #[error("Invalid character '{ch}' in market symbol '{symbol}'")]
    InvalidCharacter {
        /// The offending symbol.
        symbol: String,
        /// The first invalid character.
        ch: char,
    },
}

/// Error for trades that cannot be placed on the time axis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    /// The timestamp is not finite or lies outside the supported date range.
    #[error("Trade timestamp {0} is out of range")]
    InvalidTimestamp(f64),
}

/// Error returned when parsing a trade window from a start date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowParseError {
    /// The start date did not parse.
    #[error(transparent)]
    Date(#[from] DateParseError),

    /// The resulting window is invalid.
    #[error(transparent)]
    Window(#[from] WindowError),
}
