//! tradebars CLI - Exchange trade history as one-minute LHOC bars.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tradebars_lib::{OutputFormat, TradeWindow};

mod commands;
mod display;
mod logging;

#[derive(Parser)]
#[command(name = "tradebars")]
#[command(about = "Download exchange trade history as one-minute bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Download trades for a market and write minute bars
    Scrape {
        /// Output file path
        output: PathBuf,

        /// Window start (YYYY-MM-DD, YYYY-MM-DDTHH:MM[:SS], optionally with Z)
        start: String,

        /// Market symbol (e.g., XDG-USDT)
        market: String,

        /// Window length in hours
        #[arg(long, default_value_t = TradeWindow::DEFAULT_HOURS)]
        hours: u32,

        /// Output format (lhoc, json, ndjson)
        #[arg(short, long, default_value = "lhoc")]
        format: OutputFormat,

        /// Write a header row (lhoc format only)
        #[arg(long)]
        header: bool,

        /// On Ctrl-C, write the bars gathered so far instead of discarding them
        #[arg(long)]
        keep_partial: bool,

        /// Base URL of the trade API
        #[arg(long)]
        api_url: Option<String>,
    },

    /// List markets traded on both Kraken and Binance
    Pairs {
        /// Base URL of the Kraken API
        #[arg(long)]
        kraken_url: Option<String>,

        /// Base URL of the Binance API
        #[arg(long)]
        binance_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Scrape {
            output,
            start,
            market,
            hours,
            format,
            header,
            keep_partial,
            api_url,
        } => {
            commands::scrape::scrape(
                output,
                &start,
                &market,
                hours,
                format,
                header,
                keep_partial,
                api_url,
                cli.quiet,
            )
            .await
        }
        Commands::Pairs {
            kraken_url,
            binance_url,
        } => commands::pairs::pairs(kraken_url, binance_url).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scrape_defaults() {
        let cli = Cli::parse_from(["tradebars", "scrape", "out.csv", "2021-06-03", "XDG-USDT"]);
        let Some(Commands::Scrape {
            hours,
            format,
            header,
            keep_partial,
            api_url,
            ..
        }) = cli.command
        else {
            panic!("expected scrape command");
        };

        assert_eq!(hours, 24);
        assert_eq!(format, OutputFormat::Lhoc);
        assert!(!header);
        assert!(!keep_partial);
        assert!(api_url.is_none());
    }

    #[test]
    fn test_format_flag_accepts_aliases() {
        let cli = Cli::parse_from([
            "tradebars", "scrape", "out.jsonl", "2021-06-03", "XDG-USDT", "-f", "jsonl",
        ]);
        let Some(Commands::Scrape { format, .. }) = cli.command else {
            panic!("expected scrape command");
        };
        assert_eq!(format, OutputFormat::Ndjson);

        let parsed = Cli::try_parse_from([
            "tradebars", "scrape", "out", "2021-06-03", "XDG-USDT", "-f", "parquet",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["tradebars", "-vv", "pairs", "-q"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
    }
}
