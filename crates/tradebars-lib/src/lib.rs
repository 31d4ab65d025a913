//! Download exchange trade history and aggregate it into minute bars.
//!
//! This is a facade crate that re-exports functionality from the tradebars
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use tradebars_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let window = TradeWindow::parse("2021-06-03", TradeWindow::DEFAULT_HOURS)?;
//!     let client = ExchangeClient::with_defaults()?;
//!     let scraper = Scraper::new("XDG-USDT".parse()?, window);
//!
//!     let (bars, summary) = scraper.collect(&client).await?;
//!     println!("{} bars from {} pages", bars.len(), summary.pages);
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tradebars_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use tradebars_fetch::{
    ClientConfig, ExchangeClient, ParseError, RetryPolicy, RetryingSource, SourceError, TradePage,
    TradeSource, pairs,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use tradebars_aggregate::{
    AggregateError, MinuteAggregator, MinuteBucket, OhlcRecord, PageProgress, ScrapeError,
    ScrapeSummary, Scraper, Termination,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use tradebars_format::{FormatError, Formatter, LHOC_HEADER, LhocFormatter, OutputFormat};

#[cfg(feature = "json")]
pub use tradebars_format::JsonFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use tradebars_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tradebars_types::{Market, MinuteKey, Trade, TradeWindow, parse_date};

    #[cfg(feature = "fetch")]
    pub use tradebars_fetch::{ClientConfig, ExchangeClient, RetryPolicy, TradeSource};

    #[cfg(feature = "aggregate")]
    pub use tradebars_aggregate::{MinuteAggregator, OhlcRecord, Scraper, Termination};

    #[cfg(feature = "format")]
    pub use tradebars_format::{Formatter, LhocFormatter, OutputFormat};

    #[cfg(feature = "json")]
    pub use tradebars_format::JsonFormatter;
}
