//! Fully materialized table facade over the streaming reader and writer.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;
use tracing::debug;

use super::detector::DelimiterDetector;
use super::options::{ReadOptions, WriteOptions};
use super::reader::RowReader;
use super::row::{Row, RowKind};
use super::writer::RowWriter;
use crate::common::{Error, Result};

/// An in-memory table of rows with optional headers.
///
/// Loading fully drains the streaming reader and fixes two derived flags:
/// [`has_errors`](Self::has_errors) (any malformed row) and
/// [`columns_consistent`](Self::columns_consistent) (every data row has
/// the same cell count). Both describe the data **as loaded**; mutating
/// rows afterwards does not recompute them. The delimiter resolved at load
/// time (explicit or detected) is kept for subsequent saves.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Option<Vec<String>>,
    delimiter: Option<String>,
    rows: Vec<Row>,
    has_errors: bool,
    columns_consistent: bool,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Table {
            headers: None,
            delimiter: None,
            rows: Vec::new(),
            has_errors: false,
            columns_consistent: true,
        }
    }

    /// Load a table from a file.
    pub fn load_path<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        debug!(path = %path.display(), "loading table from file");
        Self::load_reader(BufReader::new(file), options)
    }

    /// Load a table from an in-memory byte buffer.
    pub fn load_bytes(bytes: impl Into<Vec<u8>>, options: &ReadOptions) -> Result<Self> {
        Self::load_reader(Cursor::new(bytes.into()), options)
    }

    /// Load a table from an open stream.
    ///
    /// Resolves the delimiter first: the explicit one from `options`, or a
    /// position-restoring detection pass over the source when
    /// `options.delimiter` is `None`. An undetectable delimiter fails the
    /// whole load and no table is produced.
    pub fn load_reader<R: Read + Seek>(mut reader: R, options: &ReadOptions) -> Result<Self> {
        let delimiter = match options.delimiter.as_deref() {
            Some(delimiter) if !delimiter.is_empty() => delimiter.to_string(),
            Some(_) => {
                return Err(Error::InvalidConfig(
                    "delimiter must not be empty".to_string(),
                ));
            }
            None => {
                let detector = DelimiterDetector::with_options(options.detector.clone())?;
                detector.detect(&mut reader)?.ok_or_else(|| {
                    Error::DelimiterUndetectable(
                        "no single candidate delimiter produced consistent rows".to_string(),
                    )
                })?
            }
        };

        let resolved = ReadOptions {
            delimiter: Some(delimiter.clone()),
            ..options.clone()
        };
        let source = RowReader::new(reader, &resolved)?;
        let headers = source.headers().map(<[String]>::to_vec);

        let mut table = Table {
            headers,
            delimiter: Some(delimiter),
            rows: Vec::new(),
            has_errors: false,
            columns_consistent: true,
        };
        let mut first_width: Option<usize> = None;

        for row in source {
            let row = row?;
            match row.kind() {
                RowKind::Malformed(_) => table.has_errors = true,
                RowKind::Data(cells) => match first_width {
                    None => first_width = Some(cells.len()),
                    Some(expected) if expected != cells.len() => {
                        table.columns_consistent = false;
                    }
                    Some(_) => {}
                },
            }
            table.rows.push(row);
        }

        debug!(
            rows = table.rows.len(),
            has_errors = table.has_errors,
            columns_consistent = table.columns_consistent,
            "table loaded"
        );
        Ok(table)
    }

    /// Serialize the table to a file. Fails before the file is touched
    /// when the table delimiter is unset.
    pub fn save_path<P: AsRef<Path>>(&self, path: P, options: &WriteOptions) -> Result<()> {
        self.require_delimiter()?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.save_writer(&mut writer, options)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize the table to a stream.
    ///
    /// Headers, when present, are written first as an ordinary data row,
    /// then the body rows. The table's own delimiter overrides
    /// `options.delimiter` and must be set and non-empty; this is checked
    /// before any byte is written.
    pub fn save_writer<W: Write>(&self, writer: W, options: &WriteOptions) -> Result<()> {
        let delimiter = self.require_delimiter()?;
        let options = WriteOptions {
            delimiter: delimiter.to_string(),
            ..options.clone()
        };
        let mut writer = RowWriter::new(writer, options)?;
        if let Some(headers) = &self.headers {
            writer.write_values(headers)?;
        }
        writer.write_all_rows(&self.rows)?;
        writer.into_inner()?;
        debug!(rows = self.rows.len(), "table saved");
        Ok(())
    }

    fn require_delimiter(&self) -> Result<&str> {
        match self.delimiter.as_deref() {
            Some(delimiter) if !delimiter.is_empty() => Ok(delimiter),
            _ => Err(Error::InvalidConfig(
                "table delimiter is not set; call set_delimiter before saving".to_string(),
            )),
        }
    }

    /// The captured header field values.
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Replace the header field values.
    pub fn set_headers(&mut self, headers: Option<Vec<String>>) {
        self.headers = headers;
    }

    /// The delimiter used for saving.
    pub fn delimiter(&self) -> Option<&str> {
        self.delimiter.as_deref()
    }

    /// Replace the delimiter used for saving.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) {
        self.delimiter = Some(delimiter.into());
    }

    /// The loaded rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable access to the rows.
    pub fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether any loaded row was malformed, as of load time.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Whether every data row had the same cell count, as of load time.
    /// Vacuously true when there were no data rows.
    pub fn columns_consistent(&self) -> bool {
        self.columns_consistent
    }

    /// Whether all data rows have exactly `expected` cells.
    ///
    /// When the load-time consistency flag held, only the first data row
    /// needs checking; otherwise every row is scanned.
    pub fn has_column_count(&self, expected: usize) -> bool {
        let mut data_rows = self.rows.iter().filter(|row| !row.is_malformed());
        if self.columns_consistent {
            data_rows.next().is_none_or(|row| row.len() == expected)
        } else {
            data_rows.all(|row| row.len() == expected)
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
