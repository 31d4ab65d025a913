//! Exchange endpoint URLs.

/// Base URL of the Kraken REST API.
pub const KRAKEN_API_URL: &str = "https://api.kraken.com";

/// Base URL of the Binance web API that lists products.
pub const BINANCE_API_URL: &str = "https://www.binance.com";

/// Builds the URL for one page of Kraken trade history.
///
/// URL format: `{base}/0/public/Trades?pair={PAIR}&since={SECONDS}`
///
/// # Example
///
/// ```
/// use tradebars_fetch::url::{KRAKEN_API_URL, trades_url};
///
/// let url = trades_url(KRAKEN_API_URL, "XDGUSDT", 1_622_678_400.0);
/// assert_eq!(url, "https://api.kraken.com/0/public/Trades?pair=XDGUSDT&since=1622678400");
/// ```
#[must_use]
pub fn trades_url(base: &str, pair: &str, since: f64) -> String {
    format!(
        "{}/0/public/Trades?pair={}&since={}",
        base.trim_end_matches('/'),
        pair,
        since
    )
}

/// Builds the URL listing every Kraken asset pair.
#[must_use]
pub fn asset_pairs_url(base: &str) -> String {
    format!("{}/0/public/AssetPairs", base.trim_end_matches('/'))
}

/// Builds the URL listing Binance spot products.
#[must_use]
pub fn binance_products_url(base: &str) -> String {
    format!(
        "{}/bapi/asset/v2/public/asset-service/product/get-products?includeEtf=false",
        base.trim_end_matches('/')
    )
}
