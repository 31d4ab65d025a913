//! Core types for the tradebars trade aggregator.
//!
//! This crate provides the fundamental data structures used throughout tradebars:
//!
//! - [`Trade`] - A single executed trade with price, volume, and timestamp
//! - [`MinuteKey`] - UTC minute a trade falls into
//! - [`Market`] - Market symbol such as `XDG-USDT`
//! - [`TradeWindow`] - Half-open time window to aggregate over
//! - [`parse_date`] - Date parser for CLI input and minute keys

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date;
mod error;
mod market;
mod minute;
mod trade;
mod window;

pub use date::{DateFormat, parse_date};
pub use error::{DateParseError, MarketParseError, TradeError, WindowError, WindowParseError};
pub use market::{Market, SEPARATOR};
pub use minute::MinuteKey;
pub use trade::Trade;
pub use window::TradeWindow;
