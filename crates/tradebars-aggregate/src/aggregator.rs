//! Minute bucketing of trades.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tradebars_types::{MinuteKey, Trade};

use crate::{AggregateError, OhlcRecord};

/// Collects trades into per-minute buckets and folds them into bars.
///
/// Buckets are created on the first trade of a minute and only ever grow;
/// trades keep their arrival order, which decides `open` and `close`.
#[derive(Debug, Default)]
pub struct MinuteAggregator {
    buckets: BTreeMap<MinuteKey, MinuteBucket>,
    trade_count: usize,
}

impl MinuteAggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            trade_count: 0,
        }
    }

    /// Appends a trade to the bucket of its minute.
    pub fn insert(&mut self, trade: Trade) {
        self.buckets.entry(trade.minute()).or_default().push(trade);
        self.trade_count += 1;
    }

    /// Returns the number of non-empty minutes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if no trade has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns the total number of trades inserted.
    #[must_use]
    pub const fn trade_count(&self) -> usize {
        self.trade_count
    }

    /// Builds one bar per minute, in ascending minute order.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume sum of a minute overflows.
    pub fn records(&self) -> Result<Vec<OhlcRecord>, AggregateError> {
        self.buckets
            .iter()
            .filter_map(|(minute, bucket)| bucket.to_record(*minute).transpose())
            .collect()
    }
}

/// Trades of one minute, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct MinuteBucket {
    trades: Vec<Trade>,
}

impl MinuteBucket {
    /// Appends a trade.
    pub fn push(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    /// Returns the number of trades.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Returns true if the bucket holds no trade.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Folds the bucket into a bar, or `None` if it is empty.
    ///
    /// Low and high order trades by price, then by price text, then by
    /// volume text, so numerically equal prices such as `0.3` and `0.30`
    /// resolve to the same text whatever order they arrived in.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume sum overflows.
    pub fn to_record(&self, minute: MinuteKey) -> Result<Option<OhlcRecord>, AggregateError> {
        let (Some(first), Some(last)) = (self.trades.first(), self.trades.last()) else {
            return Ok(None);
        };

        let mut low = first;
        let mut high = first;
        let mut volume = Decimal::ZERO;
        for trade in &self.trades {
            if extreme_order(trade, low) == Ordering::Less {
                low = trade;
            }
            if extreme_order(trade, high) == Ordering::Greater {
                high = trade;
            }
            volume = volume
                .checked_add(trade.volume())
                .ok_or(AggregateError::VolumeOverflow(minute))?;
        }

        Ok(Some(OhlcRecord::new(
            minute,
            low.price(),
            high.price(),
            first.price(),
            last.price(),
            volume,
            u32::try_from(self.trades.len()).unwrap_or(u32::MAX),
        )))
    }
}

fn extreme_order(a: &Trade, b: &Trade) -> Ordering {
    a.price()
        .cmp(&b.price())
        .then_with(|| a.price().to_string().cmp(&b.price().to_string()))
        .then_with(|| a.volume().to_string().cmp(&b.volume().to_string()))
}
