//! Minute bar aggregation for tradebars.
//!
//! This crate turns a paginated trade history into one-minute bars:
//!
//! - [`OhlcRecord`] - LHOC bar data structure
//! - [`MinuteAggregator`] - Per-minute trade buckets
//! - [`Scraper`] - Pagination loop over a [`TradeSource`](tradebars_fetch::TradeSource)

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod error;
mod ohlc;
mod scraper;

pub use aggregator::{MinuteAggregator, MinuteBucket};
pub use error::{AggregateError, ScrapeError};
pub use ohlc::OhlcRecord;
pub use scraper::{PageProgress, ScrapeSummary, Scraper, Termination};
