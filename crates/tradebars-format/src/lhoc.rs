//! LHOC line output format.

use std::io::Write;
use tradebars_aggregate::OhlcRecord;

use crate::{FormatError, Formatter};

/// Header row written when [`LhocFormatter::with_header`] is enabled.
pub const LHOC_HEADER: &str = "minute,epoch,low,high,open,close,volume";

/// Comma-separated bar lines: `minute,epoch,low,high,open,close,volume`.
///
/// Prices are written with the decimal text the exchange sent and the volume
/// as an exact sum. No header is written unless asked for.
#[derive(Debug, Clone, Default)]
pub struct LhocFormatter {
    include_header: bool,
}

impl LhocFormatter {
    /// Creates a formatter that writes bare lines.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_header: false,
        }
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    fn write_bar<W: Write>(bar: &OhlcRecord, writer: &mut W) -> std::io::Result<()> {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            bar.minute_iso(),
            bar.epoch_seconds(),
            bar.low,
            bar.high,
            bar.open,
            bar.close,
            bar.volume
        )
    }
}

impl Formatter for LhocFormatter {
    fn write_bars<W: Write + Send>(
        &self,
        bars: &[OhlcRecord],
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.include_header {
            writeln!(writer, "{LHOC_HEADER}")?;
        }

        for bar in bars {
            Self::write_bar(bar, &mut writer)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;
    use tradebars_types::MinuteKey;

    fn create_test_bar() -> OhlcRecord {
        let minute: MinuteKey = "2021-06-03T00:36".parse().unwrap();
        OhlcRecord::new(
            minute,
            dec!(0.28),
            dec!(0.31),
            dec!(0.30),
            dec!(0.31),
            dec!(18),
            3,
        )
    }

    #[test]
    fn test_lhoc_line() {
        let formatter = LhocFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_bars(&[create_test_bar()], &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(
            result,
            "2021-06-03T00:36:00,1622680560,0.28,0.31,0.30,0.31,18\n"
        );
    }

    #[test]
    fn test_lhoc_header() {
        let formatter = LhocFormatter::new().with_header(true);
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_bars(&[create_test_bar()], &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], LHOC_HEADER);
    }

    #[test]
    fn test_lhoc_empty_writes_nothing() {
        let formatter = LhocFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&[], &mut output).unwrap();

        assert!(output.into_inner().is_empty());
    }

    #[test]
    fn test_lhoc_to_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        LhocFormatter::new()
            .write_bars(&[create_test_bar()], file.reopen().unwrap())
            .unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert!(written.starts_with("2021-06-03T00:36:00,"));
    }
}
