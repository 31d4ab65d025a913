//! LHOC bar data structure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradebars_types::MinuteKey;

/// One-minute bar built from the trades of a single minute.
///
/// Prices keep the source scale of the trade they were taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OhlcRecord {
    /// Minute the bar covers.
    pub minute: MinuteKey,
    /// Lowest trade price.
    pub low: Decimal,
    /// Highest trade price.
    pub high: Decimal,
    /// Price of the first trade received for the minute.
    pub open: Decimal,
    /// Price of the last trade received for the minute.
    pub close: Decimal,
    /// Exact sum of traded volume.
    pub volume: Decimal,
    /// Number of trades in the bar.
    pub trade_count: u32,
}

impl OhlcRecord {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(
        minute: MinuteKey,
        low: Decimal,
        high: Decimal,
        open: Decimal,
        close: Decimal,
        volume: Decimal,
        trade_count: u32,
    ) -> Self {
        Self {
            minute,
            low,
            high,
            open,
            close,
            volume,
            trade_count,
        }
    }

    /// Returns the minute start as `YYYY-MM-DDTHH:MM:SS`.
    #[must_use]
    pub fn minute_iso(&self) -> String {
        self.minute.to_iso_seconds()
    }

    /// Returns the minute start in whole seconds since the epoch.
    #[must_use]
    pub fn epoch_seconds(&self) -> i64 {
        self.minute.epoch_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minute_fields() {
        let minute: MinuteKey = "2021-01-01T00:36".parse().unwrap();
        let bar = OhlcRecord::new(
            minute,
            dec!(340.51),
            dec!(340.91),
            dec!(340.51),
            dec!(340.58),
            dec!(9.93893384),
            4,
        );

        assert_eq!(bar.minute_iso(), "2021-01-01T00:36:00");
        assert_eq!(bar.epoch_seconds(), 1_609_461_360);
    }
}
