//! Scrape command implementation.
//!
//! This module downloads the trade history of one market over a window and
//! writes its one-minute bars to a file.

use crate::display::{window_progress, write_bars};
use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;
use std::future::Future;
use std::path::PathBuf;
use tracing::warn;
use tradebars_lib::prelude::*;
use tradebars_lib::ScrapeSummary;

/// Where and how bars are written.
pub(crate) struct OutputTarget {
    pub(crate) path: PathBuf,
    pub(crate) format: OutputFormat,
    pub(crate) header: bool,
    /// Write the bars gathered so far when interrupted.
    pub(crate) keep_partial: bool,
}

/// Download trades for a market and write its minute bars.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn scrape(
    output: PathBuf,
    start: &str,
    market: &str,
    hours: u32,
    format: OutputFormat,
    header: bool,
    keep_partial: bool,
    api_url: Option<String>,
    quiet: bool,
) -> Result<()> {
    // Everything that can be rejected locally is checked before the first request.
    let window = TradeWindow::parse(start, hours)
        .with_context(|| format!("Invalid window start: {start}"))?;
    let market: Market = market
        .parse()
        .with_context(|| format!("Invalid market: {market}"))?;

    let mut config = ClientConfig::default();
    if let Some(url) = api_url {
        config.kraken_url = url;
    }
    let client = ExchangeClient::new(config)?;

    let progress = window_progress(&window, &market, quiet)?;
    let scraper = Scraper::new(market, window);
    let target = OutputTarget {
        path: output,
        format,
        header,
        keep_partial,
    };

    scrape_to_file(&scraper, &client, ctrl_c(), &target, &progress).await?;

    if !quiet {
        println!("Output written to: {}", target.path.display());
    }

    Ok(())
}

/// Resolves on the first Ctrl-C; never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Runs `scraper` against `source` until it finishes or `shutdown` resolves,
/// then writes the bars to `target`.
///
/// Nothing is written on a source error, nor on shutdown unless
/// `target.keep_partial` is set. Shutdown is always reported as an error.
pub(crate) async fn scrape_to_file<F>(
    scraper: &Scraper,
    source: &dyn TradeSource,
    shutdown: F,
    target: &OutputTarget,
    progress: &ProgressBar,
) -> Result<ScrapeSummary>
where
    F: Future<Output = ()>,
{
    let window = *scraper.window();
    let mut aggregator = MinuteAggregator::new();

    let outcome = tokio::select! {
        result = scraper.run(source, &mut aggregator, |page| {
            progress.set_position(window.elapsed_seconds(page.now));
        }) => Some(result),
        () = shutdown => None,
    };

    let Some(result) = outcome else {
        progress.abandon_with_message("interrupted");
        if target.keep_partial {
            let bars = aggregator.records()?;
            write_bars(&bars, &target.path, target.format, target.header)?;
            warn!(bars = bars.len(), "interrupted, wrote partial bars");
            bail!(
                "Interrupted; {} partial bars written to {}",
                bars.len(),
                target.path.display()
            );
        }
        bail!("Interrupted; nothing written");
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            progress.abandon_with_message("failed");
            return Err(e).with_context(|| format!("Failed to scrape {}", scraper.market()));
        }
    };

    let bars = aggregator.records()?;
    progress.finish_with_message(format!(
        "{} trades in {} bars ({})",
        summary.trades_kept,
        bars.len(),
        summary.termination
    ));

    write_bars(&bars, &target.path, target.format, target.header)?;

    Ok(summary)
}
