//! Aggregation and scrape errors.

use thiserror::Error;
use tradebars_fetch::SourceError;
use tradebars_types::MinuteKey;

/// Errors raised while folding buckets into bars.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// The volume sum of a minute does not fit in a `Decimal`.
    #[error("Volume sum overflowed for minute {0}")]
    VolumeOverflow(MinuteKey),
}

/// Errors raised by [`Scraper::collect`](crate::Scraper::collect).
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The trade source failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The downloaded trades could not be folded into bars.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}
