//! Configuration for reading, writing, and delimiter detection.
//!
//! Each operation takes one options struct with named, documented defaults
//! and builder-style setters; presets cover the common formats.

use crate::common::bom::BomKind;
use crate::common::{Error, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

/// Default delimiter candidates probed by auto-detection.
pub const DEFAULT_CANDIDATES: &[&str] = &[",", ";", "\t", "|"];
/// Default minimum number of consistent sample rows required to trust a
/// candidate.
pub const DEFAULT_MIN_ROWS_TO_TEST: usize = 2;
/// Default maximum number of sample rows inspected per candidate.
pub const DEFAULT_MAX_ROWS_TO_TEST: usize = 10;

/// Configuration for parsing delimited text sources.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Field delimiter; `None` requests auto-detection where the operation
    /// supports it.
    pub delimiter: Option<String>,
    /// Whether the first physical line is a header row. A header is
    /// consumed and captured separately rather than iterated.
    pub has_headers: bool,
    /// Whether to silently drop rows whose tokenized fields are all empty.
    pub skip_blank_lines: bool,
    /// Text encoding of the source; `None` sniffs the byte order mark and
    /// falls back to UTF-8.
    pub encoding: Option<&'static Encoding>,
    /// Detection bounds used when `delimiter` is `None`.
    pub detector: DetectorOptions,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            delimiter: Some(",".to_string()),
            has_headers: true,
            skip_blank_lines: false,
            encoding: None,
            detector: DetectorOptions::default(),
        }
    }
}

impl ReadOptions {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma-separated (CSV) preset.
    pub fn csv() -> Self {
        Self::default()
    }

    /// Tab-separated (TSV) preset.
    pub fn tsv() -> Self {
        Self::default().with_delimiter("\t")
    }

    /// Semicolon-separated (PRN) preset.
    pub fn prn() -> Self {
        Self::default().with_delimiter(";")
    }

    /// Pipe-separated preset.
    pub fn pipe() -> Self {
        Self::default().with_delimiter("|")
    }

    /// Set an explicit field delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Request delimiter auto-detection instead of a fixed delimiter.
    pub fn with_auto_delimiter(mut self) -> Self {
        self.delimiter = None;
        self
    }

    /// Set whether the first line contains headers.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Enable/disable blank-line suppression.
    pub fn with_skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }

    /// Set an explicit source encoding.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the detection bounds used with auto-detection.
    pub fn with_detector(mut self, detector: DetectorOptions) -> Self {
        self.detector = detector;
        self
    }

    /// The explicit delimiter this configuration must carry, checked
    /// before any I/O.
    pub(crate) fn require_delimiter(&self) -> Result<&str> {
        match self.delimiter.as_deref() {
            Some(delimiter) if !delimiter.is_empty() => Ok(delimiter),
            Some(_) => Err(Error::InvalidConfig(
                "delimiter must not be empty".to_string(),
            )),
            None => Err(Error::InvalidConfig(
                "an explicit delimiter is required; run delimiter detection first".to_string(),
            )),
        }
    }
}

/// Bounds for the delimiter detection sampling window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorOptions {
    /// Candidate delimiters, probed in order.
    pub candidates: Vec<String>,
    /// Minimum number of consistent sample rows required to trust a
    /// candidate. Must be greater than zero.
    pub min_rows: usize,
    /// Maximum number of sample rows inspected per candidate. Must not be
    /// less than `min_rows`.
    pub max_rows: usize,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        DetectorOptions {
            candidates: DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            min_rows: DEFAULT_MIN_ROWS_TO_TEST,
            max_rows: DEFAULT_MAX_ROWS_TO_TEST,
        }
    }
}

impl DetectorOptions {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate delimiters.
    pub fn with_candidates<I>(mut self, candidates: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Set the minimum sample row count.
    pub fn with_min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    /// Set the maximum sample row count.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Validate the bounds, before any I/O is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.candidates.is_empty() {
            return Err(Error::InvalidConfig(
                "candidate delimiter list must not be empty".to_string(),
            ));
        }
        if self.candidates.iter().any(|c| c.is_empty()) {
            return Err(Error::InvalidConfig(
                "candidate delimiters must not be empty strings".to_string(),
            ));
        }
        if self.min_rows == 0 {
            return Err(Error::InvalidConfig(
                "min_rows must be greater than zero".to_string(),
            ));
        }
        if self.max_rows < self.min_rows {
            return Err(Error::InvalidConfig(
                "max_rows must not be less than min_rows".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for serializing rows to delimited text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Field delimiter written between cells.
    pub delimiter: String,
    /// Quote every cell regardless of content.
    pub always_quote: bool,
    /// Byte order mark to emit before the first row.
    pub write_bom: Option<BomKind>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            delimiter: ",".to_string(),
            always_quote: false,
            write_bom: None,
        }
    }
}

impl WriteOptions {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab-separated (TSV) preset.
    pub fn tsv() -> Self {
        Self::default().with_delimiter("\t")
    }

    /// Semicolon-separated (PRN) preset.
    pub fn prn() -> Self {
        Self::default().with_delimiter(";")
    }

    /// Pipe-separated preset.
    pub fn pipe() -> Self {
        Self::default().with_delimiter("|")
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Force quoting on every cell.
    pub fn with_always_quote(mut self, always_quote: bool) -> Self {
        self.always_quote = always_quote;
        self
    }

    /// Emit a byte order mark before the first row.
    pub fn with_write_bom(mut self, bom: Option<BomKind>) -> Self {
        self.write_bom = bom;
        self
    }

    /// Validate the configuration, before any byte is written.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(Error::InvalidConfig(
                "delimiter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_presets() {
        assert_eq!(ReadOptions::csv().delimiter.as_deref(), Some(","));
        assert_eq!(ReadOptions::tsv().delimiter.as_deref(), Some("\t"));
        assert_eq!(ReadOptions::prn().delimiter.as_deref(), Some(";"));
        assert_eq!(ReadOptions::pipe().delimiter.as_deref(), Some("|"));
        assert!(ReadOptions::new().with_auto_delimiter().delimiter.is_none());
    }

    #[test]
    fn test_require_delimiter() {
        assert!(ReadOptions::csv().require_delimiter().is_ok());
        assert!(matches!(
            ReadOptions::new().with_delimiter("").require_delimiter(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ReadOptions::new().with_auto_delimiter().require_delimiter(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_detector_validation() {
        assert!(DetectorOptions::new().validate().is_ok());
        assert!(
            DetectorOptions::new()
                .with_candidates(Vec::<String>::new())
                .validate()
                .is_err()
        );
        assert!(
            DetectorOptions::new()
                .with_candidates(["", ","])
                .validate()
                .is_err()
        );
        assert!(DetectorOptions::new().with_min_rows(0).validate().is_err());
        assert!(
            DetectorOptions::new()
                .with_min_rows(5)
                .with_max_rows(4)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_write_validation() {
        assert!(WriteOptions::new().validate().is_ok());
        assert!(WriteOptions::new().with_delimiter("").validate().is_err());
    }
}
