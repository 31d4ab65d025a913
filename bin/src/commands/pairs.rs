//! Pairs command implementation.
//!
//! Prints the markets listed on both Kraken and Binance, space-separated on
//! one line, in the `BASE-QUOTE` form `scrape` accepts.

use anyhow::{Context, Result};
use tradebars_lib::pairs::fetch_common_markets;
use tradebars_lib::prelude::*;

/// List markets traded on both exchanges.
pub(crate) async fn pairs(kraken_url: Option<String>, binance_url: Option<String>) -> Result<()> {
    let defaults = ClientConfig::default();
    let config = ClientConfig {
        kraken_url: kraken_url.unwrap_or(defaults.kraken_url),
        binance_url: binance_url.unwrap_or(defaults.binance_url),
        ..defaults
    };
    let client = ExchangeClient::new(config)?;

    let markets = fetch_common_markets(&client)
        .await
        .context("Failed to fetch market listings")?;

    let line = markets
        .iter()
        .map(Market::symbol)
        .collect::<Vec<_>>()
        .join(" ");
    println!("{line}");

    Ok(())
}
