//! Kraken `Trades` response decoding.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;
use tradebars_types::Trade;

use crate::{SourceError, TradePage};

/// Key of the pagination cursor inside the Kraken `result` object.
const CURSOR_KEY: &str = "last";

/// Scale between the Kraken cursor (nanoseconds) and `since` (seconds).
const CURSOR_SCALE: f64 = 1e9;

/// Errors that can occur while decoding exchange responses.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Body is not valid JSON or not the expected envelope.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A successful response carried no `result` object.
    #[error("Response has no result")]
    MissingResult,

    /// The result object holds no trade array for the pair.
    #[error("Response has no trades for {0}")]
    MissingTrades(String),

    /// A trade row could not be decoded.
    #[error("Invalid trade at index {index}: {reason}")]
    InvalidTrade {
        /// Position of the row in the trade array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The pagination cursor is missing or not numeric.
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),
}

/// The `{ "error": [...], "result": {...} }` envelope shared by Kraken endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct KrakenEnvelope {
    #[serde(default)]
    pub(crate) error: Vec<String>,
    #[serde(default)]
    pub(crate) result: Option<Map<String, Value>>,
}

impl KrakenEnvelope {
    /// Returns the result object, or the reported error codes.
    pub(crate) fn into_result(self) -> Result<Map<String, Value>, SourceError> {
        if !self.error.is_empty() {
            return Err(SourceError::Rejected { codes: self.error });
        }
        self.result.ok_or_else(|| ParseError::MissingResult.into())
    }
}

/// Decodes a Kraken `Trades` response body into a page.
///
/// The trade array is looked up under `pair`; Kraken may answer with its own
/// canonical pair name instead (`XXBTZUSD` for `XBTUSD`), so when `pair` is
/// absent the single non-cursor entry is used.
///
/// # Errors
///
/// Returns [`SourceError::Rejected`] if the body reports error codes, and
/// [`SourceError::Parse`] if it is malformed.
pub fn parse_trades(body: &[u8], pair: &str) -> Result<TradePage, SourceError> {
    let envelope: KrakenEnvelope = serde_json::from_slice(body).map_err(ParseError::from)?;
    let result = envelope.into_result()?;

    let next_cursor = result
        .get(CURSOR_KEY)
        .ok_or_else(|| ParseError::InvalidCursor("missing".to_string()))
        .and_then(parse_cursor)?;

    let rows = trade_rows(&result, pair)?;
    let trades = rows
        .iter()
        .enumerate()
        .map(|(index, row)| parse_trade_row(index, row))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TradePage::new(trades, next_cursor))
}

fn trade_rows<'a>(result: &'a Map<String, Value>, pair: &str) -> Result<&'a [Value], ParseError> {
    let missing = || ParseError::MissingTrades(pair.to_string());

    let value = match result.get(pair) {
        Some(value) => value,
        None => {
            let mut others = result.iter().filter(|(key, _)| key.as_str() != CURSOR_KEY);
            match (others.next(), others.next()) {
                (Some((_, value)), None) => value,
                _ => return Err(missing()),
            }
        }
    };

    value.as_array().map(Vec::as_slice).ok_or_else(missing)
}

fn parse_trade_row(index: usize, row: &Value) -> Result<Trade, ParseError> {
    let invalid = |reason: &str| ParseError::InvalidTrade {
        index,
        reason: reason.to_string(),
    };

    let fields = row.as_array().ok_or_else(|| invalid("not an array"))?;
    if fields.len() < 3 {
        return Err(invalid("fewer than 3 fields"));
    }

    let price = decimal_field(&fields[0]).ok_or_else(|| invalid("bad price"))?;
    let volume = decimal_field(&fields[1]).ok_or_else(|| invalid("bad volume"))?;
    let timestamp = float_field(&fields[2]).ok_or_else(|| invalid("bad timestamp"))?;

    Trade::new(price, volume, timestamp).map_err(|e| invalid(&e.to_string()))
}

fn parse_cursor(value: &Value) -> Result<f64, ParseError> {
    float_field(value)
        .map(|nanos| nanos / CURSOR_SCALE)
        .ok_or_else(|| ParseError::InvalidCursor(value.to_string()))
}

fn decimal_field(value: &Value) -> Option<Decimal> {
    value.as_str().and_then(|s| Decimal::from_str(s).ok())
}

fn float_field(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    number.filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "error": [],
        "result": {
            "XDGUSDT": [
                ["0.30", "10", 1622678160.0, "b", "l", "", 1],
                ["0.28", "5", 1622678170.0, "s", "l", "", 2],
                ["0.31", "3", 1622678399.0, "b", "m", "", 3]
            ],
            "last": "1622678399000000000"
        }
    }"#;

    #[test]
    fn test_parse_page() {
        let page = parse_trades(PAGE.as_bytes(), "XDGUSDT").unwrap();

        assert_eq!(page.len(), 3);
        assert_eq!(page.next_cursor, 1_622_678_399.0);
        assert_eq!(page.trades[0].price().to_string(), "0.30");
        assert_eq!(page.trades[1].volume().to_string(), "5");
        assert_eq!(page.trades[2].timestamp(), 1_622_678_399.0);
    }

    #[test]
    fn test_canonical_pair_fallback() {
        let body = r#"{"error":[],"result":{"XXBTZUSD":[["34000.1","0.5",1622678160.25]],"last":1622678160000000000}}"#;
        let page = parse_trades(body.as_bytes(), "XBTUSD").unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page.next_cursor, 1_622_678_160.0);
    }

    #[test]
    fn test_empty_trade_array() {
        let body = r#"{"error":[],"result":{"XDGUSDT":[],"last":"1622678399000000000"}}"#;
        let page = parse_trades(body.as_bytes(), "XDGUSDT").unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_error_codes_reject() {
        let body = r#"{"error":["EGeneral:Internal error"]}"#;
        let result = parse_trades(body.as_bytes(), "XDGUSDT");

        match result {
            Err(SourceError::Rejected { codes }) => {
                assert_eq!(codes, vec!["EGeneral:Internal error".to_string()]);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_cursor() {
        let body = r#"{"error":[],"result":{"XDGUSDT":[]}}"#;
        let result = parse_trades(body.as_bytes(), "XDGUSDT");
        assert!(matches!(
            result,
            Err(SourceError::Parse(ParseError::InvalidCursor(_)))
        ));
    }

    #[test]
    fn test_ambiguous_pair() {
        let body = r#"{"error":[],"result":{"A":[],"B":[],"last":"0"}}"#;
        let result = parse_trades(body.as_bytes(), "XDGUSDT");
        assert!(matches!(
            result,
            Err(SourceError::Parse(ParseError::MissingTrades(_)))
        ));
    }

    #[test]
    fn test_invalid_trade_row() {
        let body = r#"{"error":[],"result":{"XDGUSDT":[["abc","1",1622678160.0]],"last":"0"}}"#;
        let result = parse_trades(body.as_bytes(), "XDGUSDT");
        assert!(matches!(
            result,
            Err(SourceError::Parse(ParseError::InvalidTrade { index: 0, .. }))
        ));
    }

    #[test]
    fn test_not_json() {
        let result = parse_trades(b"<html>", "XDGUSDT");
        assert!(matches!(result, Err(SourceError::Parse(ParseError::Json(_)))));
    }
}
