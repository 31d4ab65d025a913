//! JSON output format.

use std::io::Write;
use tradebars_aggregate::OhlcRecord;

use crate::{FormatError, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum JsonStyle {
    #[default]
    Array,
    Ndjson,
}

/// JSON formatter.
///
/// Decimal fields are written as strings.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    style: JsonStyle,
    /// Only applies to array style.
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Formatter for JsonFormatter {
    fn write_bars<W: Write + Send>(
        &self,
        bars: &[OhlcRecord],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, bars)?;
                } else {
                    serde_json::to_writer(&mut writer, bars)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for bar in bars {
                    serde_json::to_writer(&mut writer, bar)?;
                    writeln!(writer)?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
