//! Lazy row streaming over delimited text sources.

use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;
use tracing::{debug, trace};

use super::options::ReadOptions;
use super::row::Row;
use super::tokenizer;
use crate::common::encoding::LineReader;
use crate::common::{Error, Result};

/// A lazy, forward-only reader producing one [`Row`] per physical line.
///
/// Rows are tokenized on demand as the iterator advances and the sequence
/// is single-pass; re-reading requires re-opening the source. A line that
/// fails tokenizing becomes a malformed [`Row`] item carrying the raw text
/// and iteration continues with the next line; only an I/O failure ends
/// the sequence with an `Err` item.
///
/// The reader owns its stream, so dropping it releases the stream. Pass a
/// `&mut R` or call [`into_inner`](Self::into_inner) when the stream's
/// lifetime belongs to the caller.
pub struct RowReader<R: Read> {
    lines: LineReader<R>,
    delimiter: String,
    skip_blank_lines: bool,
    headers: Option<Vec<String>>,
    line_number: u64,
    done: bool,
}

impl RowReader<BufReader<File>> {
    /// Open a file for row streaming.
    pub fn open<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        debug!(path = %path.display(), "streaming rows from file");
        Self::new(BufReader::new(file), options)
    }
}

impl RowReader<Cursor<Vec<u8>>> {
    /// Stream rows from an in-memory byte buffer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, options: &ReadOptions) -> Result<Self> {
        Self::new(Cursor::new(bytes.into()), options)
    }
}

impl<R: Read> RowReader<R> {
    /// Wrap an open stream.
    ///
    /// Requires an explicit delimiter: this reader never auto-detects, that
    /// is the caller's job (see
    /// [`DelimiterDetector`](super::DelimiterDetector)). When
    /// `options.has_headers` is set the first physical line is consumed
    /// here and exposed through [`headers`](Self::headers) instead of the
    /// iterator.
    pub fn new(reader: R, options: &ReadOptions) -> Result<Self> {
        let delimiter = options.require_delimiter()?.to_string();
        let mut reader = RowReader {
            lines: LineReader::new(reader, options.encoding),
            delimiter,
            skip_blank_lines: options.skip_blank_lines,
            headers: None,
            line_number: 0,
            done: false,
        };
        if options.has_headers {
            reader.consume_headers()?;
        }
        Ok(reader)
    }

    fn consume_headers(&mut self) -> Result<()> {
        if let Some(line) = self.lines.read_line()? {
            self.line_number += 1;
            // A header line that fails tokenizing is preserved verbatim as
            // a single field rather than dropped.
            self.headers = Some(match tokenizer::tokenize(&line, &self.delimiter) {
                Ok(fields) => fields,
                Err(_) => vec![line],
            });
        }
        Ok(())
    }

    /// The captured header field values, when the source had a header line.
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// The delimiter in use.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Consume the reader and hand back the underlying stream.
    pub fn into_inner(self) -> R {
        self.lines.into_inner()
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let line = match self.lines.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
            self.line_number += 1;

            match tokenizer::tokenize(&line, &self.delimiter) {
                Ok(fields) => {
                    if self.skip_blank_lines && fields.iter().all(String::is_empty) {
                        continue;
                    }
                    return Some(Ok(
                        Row::from_values(fields).with_line_number(self.line_number)
                    ));
                }
                Err(reason) => {
                    trace!(line = self.line_number, ?reason, "preserving malformed line");
                    return Some(Ok(Row::malformed(line).with_line_number(self.line_number)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &str, options: &ReadOptions) -> Vec<Row> {
        RowReader::from_bytes(input, options)
            .unwrap()
            .map(|row| row.unwrap())
            .collect()
    }

    #[test]
    fn test_basic_streaming() {
        let rows = read_all("a,b\nc,d\n", &ReadOptions::csv().with_headers(false));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].values(), vec!["a", "b"]);
        assert_eq!(rows[1].values(), vec!["c", "d"]);
        assert_eq!(rows[0].line_number(), Some(1));
        assert_eq!(rows[1].line_number(), Some(2));
    }

    #[test]
    fn test_header_capture_shifts_line_numbers() {
        let reader =
            RowReader::from_bytes("name,age\nJohn,25\n", &ReadOptions::csv()).unwrap();
        assert_eq!(
            reader.headers(),
            Some(&["name".to_string(), "age".to_string()][..])
        );
        let rows: Vec<Row> = reader.map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line_number(), Some(2));
    }

    #[test]
    fn test_missing_delimiter_fails_fast() {
        let options = ReadOptions::new().with_auto_delimiter();
        assert!(matches!(
            RowReader::from_bytes("a,b\n", &options),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_line_recovery() {
        let input = "good,row\n\"broken,row\nnext,row\n";
        let rows = read_all(input, &ReadOptions::csv().with_headers(false));
        assert_eq!(rows.len(), 3);
        assert!(!rows[0].is_malformed());
        assert!(rows[1].is_malformed());
        assert_eq!(rows[1].raw_line(), Some("\"broken,row"));
        assert_eq!(rows[1].line_number(), Some(2));
        assert!(!rows[2].is_malformed());
        assert_eq!(rows[2].values(), vec!["next", "row"]);
        assert_eq!(rows[2].line_number(), Some(3));
    }

    #[test]
    fn test_blank_line_suppression_keeps_numbering() {
        let input = "a,b\n\nc,d\n";
        let kept = read_all(
            input,
            &ReadOptions::csv().with_headers(false).with_skip_blank_lines(true),
        );
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].line_number(), Some(3));

        let all = read_all(input, &ReadOptions::csv().with_headers(false));
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].values(), vec![""]);
    }

    #[test]
    fn test_quoted_delimiter_in_field() {
        let rows = read_all(
            "\"a,b\",c\n",
            &ReadOptions::csv().with_headers(false),
        );
        assert_eq!(rows[0].values(), vec!["a,b", "c"]);
    }

    #[test]
    fn test_malformed_header_preserved_verbatim() {
        let reader = RowReader::from_bytes("\"bad header\nx,y\n", &ReadOptions::csv()).unwrap();
        assert_eq!(reader.headers(), Some(&["\"bad header".to_string()][..]));
    }

    #[test]
    fn test_open_missing_file() {
        assert!(matches!(
            RowReader::open("/nonexistent/file.csv", &ReadOptions::csv()),
            Err(Error::FileNotFound(_))
        ));
    }

    #[test]
    fn test_into_inner_returns_stream() {
        let mut reader =
            RowReader::from_bytes("a,b\nc,d\n", &ReadOptions::csv().with_headers(false)).unwrap();
        assert!(reader.next().is_some());
        let cursor = reader.into_inner();
        // The whole buffer was consumed by the chunked decoder even though
        // only one row was pulled.
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_borrowed_stream_left_open() {
        let mut cursor = Cursor::new(b"a,b\nc,d\n".to_vec());
        {
            let reader =
                RowReader::new(&mut cursor, &ReadOptions::csv().with_headers(false)).unwrap();
            assert_eq!(reader.count(), 2);
        }
        // The caller still owns the stream after the reader is gone.
        assert_eq!(cursor.position(), 8);
    }
}
