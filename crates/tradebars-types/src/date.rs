//! Date parsing for window starts and minute keys.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::DateParseError;

/// Accepted date formats, in the order [`parse_date`] tries them.
///
/// Every format is interpreted as UTC, with or without the `Z` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `YYYY-MM-DD`, midnight implied.
    Date,
    /// `YYYY-MM-DDTHH:MM`, the minute key layout.
    Minute,
    /// `YYYY-MM-DDTHH:MM:SS`.
    Second,
    /// `YYYY-MM-DDTHH:MM:SSZ`.
    SecondZulu,
    /// `YYYY-MM-DDTHH:MM:SS.ffffffZ`.
    FractionalZulu,
}

impl DateFormat {
    /// All formats in parse order.
    pub const ALL: [Self; 5] = [
        Self::Date,
        Self::Minute,
        Self::Second,
        Self::SecondZulu,
        Self::FractionalZulu,
    ];

    /// Returns the chrono format string for this layout.
    #[must_use]
    pub const fn pattern(&self) -> &'static str {
        match self {
            Self::Date => "%Y-%m-%d",
            Self::Minute => "%Y-%m-%dT%H:%M",
            Self::Second => "%Y-%m-%dT%H:%M:%S",
            Self::SecondZulu => "%Y-%m-%dT%H:%M:%SZ",
            Self::FractionalZulu => "%Y-%m-%dT%H:%M:%S%.fZ",
        }
    }

    /// Parses `s` strictly in this format, returning `None` on mismatch.
    #[must_use]
    pub fn parse(&self, s: &str) -> Option<DateTime<Utc>> {
        let naive = match self {
            Self::Date => NaiveDate::parse_from_str(s, self.pattern())
                .ok()?
                .and_time(NaiveTime::MIN),
            _ => NaiveDateTime::parse_from_str(s, self.pattern()).ok()?,
        };
        Some(naive.and_utc())
    }
}

/// Parses a date string into a UTC instant.
///
/// The formats in [`DateFormat::ALL`] are tried in order and the first match
/// wins.
///
/// # Errors
///
/// Returns [`DateParseError::Malformed`] if no format matches.
///
/// # Example
///
/// ```
/// use tradebars_types::parse_date;
///
/// let begin = parse_date("2021-06-03").unwrap();
/// assert_eq!(begin.timestamp(), 1_622_678_400);
/// ```
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, DateParseError> {
    let s = s.trim();
    DateFormat::ALL
        .iter()
        .find_map(|format| format.parse(s))
        .ok_or_else(|| DateParseError::Malformed(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_date_only() {
        let dt = parse_date("2021-06-03").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2021, 6, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_minute() {
        let dt = parse_date("2021-06-03T00:36").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2021, 6, 3, 0, 36, 0).unwrap());
    }

    #[test]
    fn test_seconds_with_and_without_zone() {
        let expected = Utc.with_ymd_and_hms(2021, 5, 19, 11, 0, 0).unwrap();
        assert_eq!(parse_date("2021-05-19T11:00:00").unwrap(), expected);
        assert_eq!(parse_date("2021-05-19T11:00:00Z").unwrap(), expected);
    }

    #[test]
    fn test_fractional_seconds() {
        let dt = parse_date("2021-05-19T11:00:00.250000Z").unwrap();
        assert_eq!(dt.second(), 0);
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_format_order() {
        let s = "2021-05-19T11:00:00Z";
        let first = DateFormat::ALL.iter().find(|f| f.parse(s).is_some());
        assert_eq!(first, Some(&DateFormat::SecondZulu));
        assert!(DateFormat::Second.parse(s).is_none());
        assert!(DateFormat::Minute.parse(s).is_none());
    }

    #[test]
    fn test_malformed() {
        for input in ["", "yesterday", "2021/06/03", "2021-06-03 00:00:00", "2021-13-01"] {
            assert!(
                matches!(parse_date(input), Err(DateParseError::Malformed(_))),
                "{input} should not parse"
            );
        }
    }

    #[test]
    fn test_minute_round_trip() {
        let first = parse_date("2021-06-03T00:36").unwrap();
        let formatted = first.format("%Y-%m-%dT%H:%M:%S").to_string();
        let second = parse_date(&formatted).unwrap();
        assert_eq!(first.timestamp(), second.timestamp());
    }
}
