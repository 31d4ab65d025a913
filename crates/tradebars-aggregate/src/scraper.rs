//! Paginated trade download into minute buckets.

use std::fmt;
use tracing::{debug, info};
use tradebars_fetch::{RetryPolicy, RetryingSource, SourceError, TradeSource};
use tradebars_types::{Market, TradeWindow};

use crate::{MinuteAggregator, OhlcRecord, ScrapeError};

/// Why a scrape stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The source returned a page without trades.
    EmptyPage,
    /// The source returned the cursor it was called with.
    NoProgress,
    /// The last trade seen lies at or past the end of the window.
    WindowExhausted,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::EmptyPage => "empty page",
            Self::NoProgress => "cursor did not advance",
            Self::WindowExhausted => "window exhausted",
        };
        f.write_str(reason)
    }
}

/// Progress after one page has been scanned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageProgress {
    /// 1-based page number.
    pub page: u64,
    /// Timestamp of the last trade seen so far.
    pub now: f64,
    /// Trades on this page.
    pub trades: usize,
    /// Trades on this page that went into a bucket.
    pub kept: usize,
}

/// Totals of a finished scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Pages fetched successfully.
    pub pages: u64,
    /// Requests made, retries included.
    pub round_trips: u64,
    /// Trades added to buckets.
    pub trades_kept: usize,
    /// Trades returned by the source but not scanned into a bucket.
    pub trades_discarded: usize,
    /// Why the scrape stopped.
    pub termination: Termination,
}

/// Walks the trade history of one market across a window.
///
/// Pages are requested strictly one after another. Each page is scanned in
/// source order and every trade before the window end lands in its minute
/// bucket; the first trade at or past the end stops the scan of that page.
#[derive(Debug, Clone)]
pub struct Scraper {
    market: Market,
    window: TradeWindow,
    policy: RetryPolicy,
}

impl Scraper {
    /// Creates a scraper with the default retry policy.
    #[must_use]
    pub fn new(market: Market, window: TradeWindow) -> Self {
        Self::with_policy(market, window, RetryPolicy::default())
    }

    /// Creates a scraper with a custom retry policy.
    #[must_use]
    pub const fn with_policy(market: Market, window: TradeWindow, policy: RetryPolicy) -> Self {
        Self {
            market,
            window,
            policy,
        }
    }

    /// Returns the market being scraped.
    #[must_use]
    pub const fn market(&self) -> &Market {
        &self.market
    }

    /// Returns the window being scraped.
    #[must_use]
    pub const fn window(&self) -> &TradeWindow {
        &self.window
    }

    /// Downloads the window into `aggregator`, calling `on_page` after each
    /// scanned page.
    ///
    /// The aggregator keeps every trade bucketed before an error, so callers
    /// decide whether a partial result is worth emitting.
    ///
    /// # Errors
    ///
    /// Returns the first source error that survives the retry policy.
    pub async fn run<S, F>(
        &self,
        source: &S,
        aggregator: &mut MinuteAggregator,
        mut on_page: F,
    ) -> Result<ScrapeSummary, SourceError>
    where
        S: TradeSource + ?Sized,
        F: FnMut(&PageProgress),
    {
        let pair = self.market.pair();
        let end = self.window.end_seconds();
        let mut retrying = RetryingSource::new(source, &self.policy);

        let mut cursor = self.window.begin_seconds();
        let mut now = cursor;
        let mut pages = 0u64;
        let mut trades_kept = 0usize;
        let mut trades_discarded = 0usize;

        info!(market = %self.market, window = %self.window, "scraping trades");

        let termination = loop {
            if now >= end {
                break Termination::WindowExhausted;
            }

            let page = retrying.fetch_page(&pair, cursor).await?;
            pages += 1;

            if page.is_empty() {
                break Termination::EmptyPage;
            }

            let total = page.len();
            let mut kept = 0;
            if let Some(last) = page.trades.last() {
                now = last.timestamp();
            }
            for trade in page.trades {
                if trade.timestamp() >= end {
                    break;
                }
                aggregator.insert(trade);
                kept += 1;
            }
            trades_kept += kept;
            trades_discarded += total - kept;

            debug!(
                page = pages,
                trades = total,
                kept,
                now,
                cursor = page.next_cursor,
                "scanned page"
            );
            on_page(&PageProgress {
                page: pages,
                now,
                trades: total,
                kept,
            });

            if page.next_cursor.to_bits() == cursor.to_bits() {
                break Termination::NoProgress;
            }
            cursor = page.next_cursor;
        };

        let summary = ScrapeSummary {
            pages,
            round_trips: retrying.round_trips(),
            trades_kept,
            trades_discarded,
            termination,
        };
        info!(
            market = %self.market,
            pages,
            trades = trades_kept,
            minutes = aggregator.len(),
            %termination,
            "scrape finished"
        );
        Ok(summary)
    }

    /// Downloads the window and returns its bars in ascending minute order.
    ///
    /// # Errors
    ///
    /// Returns the first source error that survives the retry policy, or an
    /// error if a minute cannot be folded; no bars are returned in that case.
    pub async fn collect<S>(
        &self,
        source: &S,
    ) -> Result<(Vec<OhlcRecord>, ScrapeSummary), ScrapeError>
    where
        S: TradeSource + ?Sized,
    {
        let mut aggregator = MinuteAggregator::new();
        let summary = self.run(source, &mut aggregator, |_| {}).await?;
        Ok((aggregator.records()?, summary))
    }
}
