//! Output format abstraction.

use std::io::Write;
use thiserror::Error;
use tradebars_aggregate::OhlcRecord;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Comma-separated LHOC lines.
    #[default]
    Lhoc,
    /// JSON array format.
    #[cfg(feature = "json")]
    Json,
    /// Newline-delimited JSON format.
    #[cfg(feature = "json")]
    Ndjson,
}

impl OutputFormat {
    /// Returns the name the format is selected by.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Lhoc => "lhoc",
            #[cfg(feature = "json")]
            Self::Json => "json",
            #[cfg(feature = "json")]
            Self::Ndjson => "ndjson",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lhoc" | "csv" => Ok(Self::Lhoc),
            #[cfg(feature = "json")]
            "json" => Ok(Self::Json),
            #[cfg(feature = "json")]
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes bars to the output, in the order given.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_bars<W: Write + Send>(&self, bars: &[OhlcRecord], writer: W)
    -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("lhoc".parse::<OutputFormat>().unwrap(), OutputFormat::Lhoc);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Lhoc);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert!(matches!(
            "parquet".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_default_is_lhoc() {
        assert_eq!(OutputFormat::default(), OutputFormat::Lhoc);
        assert_eq!(OutputFormat::default().to_string(), "lhoc");
        assert_eq!(OutputFormat::Ndjson.name(), "ndjson");
    }
}
