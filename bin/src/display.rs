//! Display utilities and output formatting for the tradebars CLI.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tradebars_lib::prelude::*;

/// Write bars to a file in the specified format.
pub(crate) fn write_bars(
    bars: &[OhlcRecord],
    output: &Path,
    format: OutputFormat,
    header: bool,
) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);

    match format {
        OutputFormat::Lhoc => {
            let formatter = LhocFormatter::new().with_header(header);
            formatter.write_bars(bars, writer)?;
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new();
            formatter.write_bars(bars, writer)?;
        }
        OutputFormat::Ndjson => {
            let formatter = JsonFormatter::ndjson();
            formatter.write_bars(bars, writer)?;
        }
    }

    Ok(())
}

/// Progress bar over the seconds of a trade window.
pub(crate) fn window_progress(
    window: &TradeWindow,
    market: &Market,
    quiet: bool,
) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(window.total_seconds());
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% of window {msg}",
            )?
            .progress_chars("=>-"),
    );
    pb.set_message(format!("{market} {window}"));
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bars() -> Vec<OhlcRecord> {
        let minute: MinuteKey = "2021-06-03T00:36".parse().unwrap();
        vec![OhlcRecord::new(
            minute,
            dec!(0.28),
            dec!(0.31),
            dec!(0.30),
            dec!(0.31),
            dec!(18),
            3,
        )]
    }

    #[test]
    fn test_write_lhoc_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.csv");

        write_bars(&bars(), &path, OutputFormat::Lhoc, false).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "2021-06-03T00:36:00,1622680560,0.28,0.31,0.30,0.31,18\n"
        );
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.json");

        write_bars(&bars(), &path, OutputFormat::Json, true).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with('['));
        assert!(written.contains("\"volume\":\"18\""));
    }

    #[test]
    fn test_hidden_progress_when_quiet() {
        let window = TradeWindow::parse("2021-06-03", 24).unwrap();
        let market: Market = "XDG-USDT".parse().unwrap();

        let pb = window_progress(&window, &market, true).unwrap();
        assert!(pb.is_hidden());
    }
}
