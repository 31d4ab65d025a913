//! Classified retries and rate-limit throttling around a trade source.

use std::time::Duration;
use tracing::{debug, warn};

use crate::{SourceError, TradePage, TradeSource};

/// Kraken's generic server-side failure, the one error worth retrying.
pub const KRAKEN_INTERNAL_ERROR: &str = "EGeneral:Internal error";

/// How page fetches are retried and throttled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum attempts per page, the first one included.
    pub max_attempts: u32,
    /// Delay between attempts.
    pub retry_delay: Duration,
    /// Error codes classified as transient.
    pub retryable_codes: Vec<String>,
    /// Sleep after every Nth round-trip (0 disables throttling).
    pub throttle_every: u32,
    /// Length of the throttling sleep.
    pub throttle_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            retry_delay: Duration::from_secs(10),
            retryable_codes: vec![KRAKEN_INTERNAL_ERROR.to_string()],
            throttle_every: 5,
            throttle_delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Returns true if every code in `codes` is classified as transient.
    #[must_use]
    pub fn is_retryable(&self, codes: &[String]) -> bool {
        !codes.is_empty() && codes.iter().all(|code| self.retryable_codes.contains(code))
    }

    /// Returns a copy of this policy with all sleeps removed.
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.retry_delay = Duration::ZERO;
        self.throttle_delay = Duration::ZERO;
        self
    }
}

/// A [`TradeSource`] wrapper that applies a [`RetryPolicy`].
///
/// Fetches are strictly sequential: each call awaits the previous one, and
/// the round-trip counter that drives throttling spans every attempt.
#[derive(Debug)]
pub struct RetryingSource<'a, S: ?Sized> {
    source: &'a S,
    policy: &'a RetryPolicy,
    round_trips: u64,
}

impl<'a, S: TradeSource + ?Sized> RetryingSource<'a, S> {
    /// Wraps `source` with `policy`.
    #[must_use]
    pub const fn new(source: &'a S, policy: &'a RetryPolicy) -> Self {
        Self {
            source,
            policy,
            round_trips: 0,
        }
    }

    /// Returns the number of requests made so far, retries included.
    #[must_use]
    pub const fn round_trips(&self) -> u64 {
        self.round_trips
    }

    /// Fetches one page, retrying transient rejections.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Transient`] once the retry budget is spent, and
    /// any other error immediately.
    pub async fn fetch_page(&mut self, pair: &str, since: f64) -> Result<TradePage, SourceError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let result = self.source.fetch_page(pair, since).await;
            self.round_trips += 1;
            self.throttle().await;

            match result {
                Err(SourceError::Rejected { codes }) if self.policy.is_retryable(&codes) => {
                    if attempt >= self.policy.max_attempts {
                        return Err(SourceError::Transient {
                            codes,
                            attempts: attempt,
                        });
                    }
                    warn!(
                        pair,
                        since,
                        attempt,
                        codes = %codes.join(", "),
                        "transient source error, retrying"
                    );
                    tokio::time::sleep(self.policy.retry_delay).await;
                }
                other => return other,
            }
        }
    }

    async fn throttle(&self) {
        let every = u64::from(self.policy.throttle_every);
        if every > 0 && self.round_trips % every == 0 {
            debug!(round_trips = self.round_trips, "throttling");
            tokio::time::sleep(self.policy.throttle_delay).await;
        }
    }
}
