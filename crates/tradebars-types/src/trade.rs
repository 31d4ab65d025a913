//! Trade representation.

use rust_decimal::Decimal;

use crate::{MinuteKey, TradeError};

/// A single executed trade as reported by the trade source.
///
/// Price and volume keep the scale of the source text, so `Display` on them
/// reproduces the string the exchange sent (`"0.30"` stays `"0.30"`).
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    price: Decimal,
    volume: Decimal,
    timestamp: f64,
    minute: MinuteKey,
}

impl Trade {
    /// Creates a new trade.
    ///
    /// # Errors
    ///
    /// Returns an error if `timestamp` cannot be mapped to a UTC minute.
    pub fn new(price: Decimal, volume: Decimal, timestamp: f64) -> Result<Self, TradeError> {
        let minute =
            MinuteKey::containing(timestamp).ok_or(TradeError::InvalidTimestamp(timestamp))?;
        Ok(Self {
            price,
            volume,
            timestamp,
            minute,
        })
    }

    /// Returns the trade price.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the traded volume.
    #[must_use]
    pub const fn volume(&self) -> Decimal {
        self.volume
    }

    /// Returns the execution time in seconds since the epoch.
    #[must_use]
    pub const fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Returns the UTC minute the trade falls into.
    #[must_use]
    pub const fn minute(&self) -> MinuteKey {
        self.minute
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trade_keeps_source_scale() {
        let trade = Trade::new(dec!(0.30), dec!(10.00000000), 1_622_680_560.0).unwrap();
        assert_eq!(trade.price().to_string(), "0.30");
        assert_eq!(trade.volume().to_string(), "10.00000000");
    }

    #[test]
    fn test_trade_minute() {
        let trade = Trade::new(dec!(0.28), dec!(5), 1_622_680_570.5).unwrap();
        assert_eq!(trade.minute().to_string(), "2021-06-03T00:36");
    }

    #[test]
    fn test_trade_invalid_timestamp() {
        let result = Trade::new(dec!(1), dec!(1), f64::NAN);
        assert!(matches!(result, Err(TradeError::InvalidTimestamp(_))));
    }
}
