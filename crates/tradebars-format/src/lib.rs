//! Output formatters for tradebars minute bars.
//!
//! This crate provides formatters for writing bars to various output formats:
//!
//! - [`LhocFormatter`] - Comma-separated `minute,epoch,low,high,open,close,volume` lines
//! - [`JsonFormatter`] - JSON array or NDJSON format

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod formatter;
#[cfg(feature = "json")]
mod json;
mod lhoc;

pub use formatter::{FormatError, Formatter, OutputFormat};
pub use lhoc::{LHOC_HEADER, LhocFormatter};

#[cfg(feature = "json")]
pub use json::JsonFormatter;
