//! Trade source and market discovery for tradebars.
//!
//! This crate provides the data download side of the pipeline:
//!
//! - [`url`] - Kraken and Binance endpoint URLs
//! - [`TradeSource`] - One page of trade history per call
//! - [`ExchangeClient`] - reqwest-backed Kraken/Binance client
//! - [`parse::parse_trades`] - Kraken `Trades` response decoding
//! - [`RetryingSource`] - Classified retry and rate-limit throttling
//! - [`pairs`] - Markets listed on both Kraken and Binance

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
pub mod pairs;
pub mod parse;
mod retry;
mod source;
pub mod url;

pub use client::{ClientConfig, ExchangeClient};
pub use parse::ParseError;
pub use retry::{RetryPolicy, RetryingSource};
pub use source::{SourceError, TradePage, TradeSource};
