//! Markets listed on both Kraken and Binance.
//!
//! Kraken names assets differently from Binance (`XBT` for `BTC`, `XDG` for
//! `DOGE`) and lists stablecoin and USD quotes that Binance only offers as
//! USDT. Binance markets are therefore expanded with Kraken-style aliases
//! before intersecting the two listings.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::info;
use tradebars_types::Market;

use crate::parse::{KrakenEnvelope, ParseError};
use crate::url::{asset_pairs_url, binance_products_url};
use crate::{ExchangeClient, SourceError};

/// Binance product status for markets open for trading.
const TRADING: &str = "TRADING";

#[derive(Debug, Deserialize)]
struct BinanceProducts {
    data: Vec<BinanceProduct>,
}

#[derive(Debug, Deserialize)]
struct BinanceProduct {
    #[serde(rename = "b")]
    base: String,
    #[serde(rename = "q")]
    quote: String,
    #[serde(rename = "st")]
    status: String,
}

/// Decodes the Kraken `AssetPairs` listing into markets.
///
/// Each pair's `wsname` (`XBT/USD`) becomes a market (`XBT-USD`); pairs
/// without a websocket name are skipped.
///
/// # Errors
///
/// Returns an error if the body is malformed or reports error codes.
pub fn parse_kraken_markets(body: &[u8]) -> Result<BTreeSet<Market>, SourceError> {
    let envelope: KrakenEnvelope = serde_json::from_slice(body).map_err(ParseError::from)?;
    let result = envelope.into_result()?;

    Ok(result
        .values()
        .filter_map(|pair| pair.get("wsname").and_then(Value::as_str))
        .filter_map(|wsname| wsname.split_once('/'))
        .map(|(base, quote)| Market::from_parts(base, quote))
        .collect())
}

/// Decodes the Binance product listing into markets open for trading.
///
/// # Errors
///
/// Returns an error if the body is malformed.
pub fn parse_binance_markets(body: &[u8]) -> Result<Vec<Market>, ParseError> {
    let products: BinanceProducts = serde_json::from_slice(body)?;

    Ok(products
        .data
        .into_iter()
        .filter(|product| product.status == TRADING)
        .map(|product| Market::from_parts(&product.base, &product.quote))
        .collect())
}

/// Appends Kraken-style aliases to a Binance market list.
///
/// Steps run in order, each over the list grown by the previous ones:
/// `-USDT` cloned as `-USDC`, `-USDT` cloned as `-USD`, `-BTC` cloned as
/// `-XBT`, `BTC-` cloned as `XBT-`, and `DOGE-` cloned as `XDG-`.
#[must_use]
pub fn with_kraken_aliases(mut markets: Vec<Market>) -> Vec<Market> {
    clone_quote(&mut markets, "USDT", "USDC");
    clone_quote(&mut markets, "USDT", "USD");
    clone_quote(&mut markets, "BTC", "XBT");
    clone_base(&mut markets, "BTC", "XBT");
    clone_base(&mut markets, "DOGE", "XDG");
    markets
}

fn clone_quote(markets: &mut Vec<Market>, from: &str, to: &str) {
    let aliases: Vec<_> = markets
        .iter()
        .filter(|market| market.quote() == Some(from))
        .map(|market| market.with_quote(to))
        .collect();
    markets.extend(aliases);
}

fn clone_base(markets: &mut Vec<Market>, from: &str, to: &str) {
    let aliases: Vec<_> = markets
        .iter()
        .filter(|market| market.quote().is_some() && market.base() == from)
        .map(|market| market.with_base(to))
        .collect();
    markets.extend(aliases);
}

/// Returns the markets present in both listings, sorted by symbol.
#[must_use]
pub fn common_markets(kraken: &BTreeSet<Market>, binance: Vec<Market>) -> Vec<Market> {
    let binance: BTreeSet<Market> = with_kraken_aliases(binance).into_iter().collect();
    kraken.intersection(&binance).cloned().collect()
}

/// Fetches both listings and returns the markets they share.
///
/// # Errors
///
/// Returns an error if either request fails or returns a non-success status.
pub async fn fetch_common_markets(client: &ExchangeClient) -> Result<Vec<Market>, SourceError> {
    let config = client.config();

    let kraken_body = client.get(&asset_pairs_url(&config.kraken_url)).await?;
    let kraken = parse_kraken_markets(&kraken_body)?;

    let binance_body = client
        .get(&binance_products_url(&config.binance_url))
        .await?;
    let binance = parse_binance_markets(&binance_body)?;

    info!(
        kraken = kraken.len(),
        binance = binance.len(),
        "fetched market listings"
    );

    Ok(common_markets(&kraken, binance))
}
