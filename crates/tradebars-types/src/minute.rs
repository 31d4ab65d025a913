//! Minute-resolution bucket keys.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{DateParseError, parse_date};

/// The UTC minute a trade belongs to.
///
/// Keys order chronologically and render as `YYYY-MM-DDTHH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MinuteKey(DateTime<Utc>);

impl MinuteKey {
    /// Display layout of a minute key.
    pub const FORMAT: &'static str = "%Y-%m-%dT%H:%M";

    /// Returns the key of the minute containing `timestamp` (seconds since the epoch).
    ///
    /// Returns `None` for non-finite or out-of-range timestamps.
    #[must_use]
    pub fn containing(timestamp: f64) -> Option<Self> {
        if !timestamp.is_finite() {
            return None;
        }
        let minutes = (timestamp / 60.0).floor();
        if minutes < i64::MIN as f64 || minutes > i64::MAX as f64 {
            return None;
        }
        let seconds = (minutes as i64).checked_mul(60)?;
        DateTime::from_timestamp(seconds, 0).map(Self)
    }

    /// Returns the key of the minute containing `time`.
    #[must_use]
    pub fn of(time: DateTime<Utc>) -> Self {
        // Truncating to a minute can only fail for instants at the very edge of chrono's range.
        Self(time.duration_trunc(TimeDelta::minutes(1)).unwrap_or(time))
    }

    /// Returns the instant the minute starts at.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns the minute start in whole seconds since the epoch.
    #[must_use]
    pub fn epoch_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Renders the minute start with an explicit `:00` seconds field.
    #[must_use]
    pub fn to_iso_seconds(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

impl std::fmt::Display for MinuteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for MinuteKey {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date(s).map(Self::of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_containing_truncates() {
        let key = MinuteKey::containing(1_622_680_799.9).unwrap();
        assert_eq!(key.to_string(), "2021-06-03T00:39");
        assert_eq!(key.epoch_seconds(), 1_622_680_740);
    }

    #[test]
    fn test_containing_exact_boundary() {
        let key = MinuteKey::containing(1_622_680_560.0).unwrap();
        assert_eq!(key.to_string(), "2021-06-03T00:36");
        assert_eq!(key.to_iso_seconds(), "2021-06-03T00:36:00");
    }

    #[test]
    fn test_containing_rejects_non_finite() {
        assert!(MinuteKey::containing(f64::NAN).is_none());
        assert!(MinuteKey::containing(f64::INFINITY).is_none());
        assert!(MinuteKey::containing(1e300).is_none());
    }

    #[test]
    fn test_parse_round_trip() {
        let key: MinuteKey = "2021-06-03T00:36".parse().unwrap();
        let again: MinuteKey = key.to_iso_seconds().parse().unwrap();
        assert_eq!(key, again);
        assert_eq!(key.start(), Utc.with_ymd_and_hms(2021, 6, 3, 0, 36, 0).unwrap());
    }

    #[test]
    fn test_ordering() {
        let a = MinuteKey::containing(1_622_680_560.0).unwrap();
        let b = MinuteKey::containing(1_622_680_620.0).unwrap();
        assert!(a < b);
    }
}
