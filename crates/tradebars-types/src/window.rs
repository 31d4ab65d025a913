//! Aggregation window.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{WindowError, WindowParseError, parse_date};

/// A half-open time window `[begin, end)` to collect trades for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeWindow {
    begin: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TradeWindow {
    /// Default window length.
    pub const DEFAULT_HOURS: u32 = 24;

    /// Creates a new window, validating that begin < end.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is not after `begin`.
    pub fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, WindowError> {
        if begin >= end {
            return Err(WindowError::Empty { begin, end });
        }
        Ok(Self { begin, end })
    }

    /// Creates a window of `hours` hours starting at `begin`.
    ///
    /// # Errors
    ///
    /// Returns an error if `hours` is zero or the end overflows.
    pub fn hours_from(begin: DateTime<Utc>, hours: u32) -> Result<Self, WindowError> {
        let end = begin
            .checked_add_signed(TimeDelta::hours(i64::from(hours)))
            .ok_or(WindowError::Overflow(begin))?;
        Self::new(begin, end)
    }

    /// Parses the window start with [`parse_date`] and spans `hours` from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the date is malformed or the window is invalid.
    pub fn parse(start: &str, hours: u32) -> Result<Self, WindowParseError> {
        let begin = parse_date(start)?;
        Ok(Self::hours_from(begin, hours)?)
    }

    /// Returns the window start.
    #[must_use]
    pub const fn begin(&self) -> DateTime<Utc> {
        self.begin
    }

    /// Returns the exclusive window end.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the window start in fractional seconds since the epoch.
    #[must_use]
    pub fn begin_seconds(&self) -> f64 {
        epoch_seconds(self.begin)
    }

    /// Returns the window end in fractional seconds since the epoch.
    #[must_use]
    pub fn end_seconds(&self) -> f64 {
        epoch_seconds(self.end)
    }

    /// Returns the window length in whole seconds.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        (self.end - self.begin).num_seconds().unsigned_abs()
    }

    /// Returns how many whole seconds of the window lie before `timestamp`,
    /// clamped to the window length.
    #[must_use]
    pub fn elapsed_seconds(&self, timestamp: f64) -> u64 {
        let elapsed = (timestamp - self.begin_seconds()).max(0.0) as u64;
        elapsed.min(self.total_seconds())
    }
}

impl std::fmt::Display for TradeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.begin.format("%Y-%m-%dT%H:%M:%SZ"),
            self.end.format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}

fn epoch_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_window() {
        let begin = Utc.with_ymd_and_hms(2021, 6, 3, 0, 0, 0).unwrap();
        let window = TradeWindow::hours_from(begin, TradeWindow::DEFAULT_HOURS).unwrap();

        assert_eq!(window.end(), Utc.with_ymd_and_hms(2021, 6, 4, 0, 0, 0).unwrap());
        assert_eq!(window.begin_seconds(), 1_622_678_400.0);
        assert_eq!(window.end_seconds(), 1_622_764_800.0);
        assert_eq!(window.total_seconds(), 86_400);
    }

    #[test]
    fn test_window_invalid() {
        let begin = Utc.with_ymd_and_hms(2021, 6, 3, 0, 0, 0).unwrap();
        assert!(TradeWindow::new(begin, begin).is_err());
        assert!(TradeWindow::hours_from(begin, 0).is_err());
    }

    #[test]
    fn test_elapsed_seconds_clamped() {
        let window = TradeWindow::parse("2021-06-03", 1).unwrap();
        assert_eq!(window.elapsed_seconds(1_622_678_000.0), 0);
        assert_eq!(window.elapsed_seconds(1_622_678_460.0), 60);
        assert_eq!(window.elapsed_seconds(1_622_700_000.0), 3_600);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            TradeWindow::parse("03/06/2021", 24),
            Err(WindowParseError::Date(_))
        ));
    }
}
