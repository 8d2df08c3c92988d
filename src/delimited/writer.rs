//! Row serialization to delimited text.

use std::io::Write;

use super::options::WriteOptions;
use super::row::{Row, RowKind};
use crate::common::Result;
use crate::common::bom;

/// Serializes rows to a stream as delimited text.
///
/// Malformed rows round-trip verbatim. Data cells are quoted only when the
/// value contains the delimiter, a quote, or a line break, unless
/// [`WriteOptions::always_quote`] forces quoting; embedded quotes are
/// escaped by doubling. Every row is followed by a line feed.
///
/// The writer owns its stream; [`into_inner`](Self::into_inner) flushes
/// and hands it back for callers that keep the stream alive.
pub struct RowWriter<W: Write> {
    inner: W,
    options: WriteOptions,
}

impl<W: Write> RowWriter<W> {
    /// Wrap a stream, validating the options and emitting the requested
    /// byte order mark.
    pub fn new(inner: W, options: WriteOptions) -> Result<Self> {
        options.validate()?;
        let mut writer = RowWriter { inner, options };
        if let Some(kind) = writer.options.write_bom {
            bom::write_bom(&mut writer.inner, kind)?;
        }
        Ok(writer)
    }

    /// Serialize one row.
    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        match row.kind() {
            RowKind::Malformed(raw) => {
                self.inner.write_all(raw.as_bytes())?;
            }
            RowKind::Data(cells) => {
                for (index, cell) in cells.iter().enumerate() {
                    if index > 0 {
                        self.inner.write_all(self.options.delimiter.as_bytes())?;
                    }
                    self.write_field(cell.as_str())?;
                }
            }
        }
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    /// Serialize plain string values as one row.
    pub fn write_values<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut first = true;
        for value in values {
            if !first {
                self.inner.write_all(self.options.delimiter.as_bytes())?;
            }
            first = false;
            self.write_field(value.as_ref())?;
        }
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    /// Serialize every row in a sequence.
    pub fn write_all_rows<'a, I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Flush and hand back the underlying stream.
    pub fn into_inner(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn write_field(&mut self, value: &str) -> Result<()> {
        if self.options.always_quote || needs_quoting(value, &self.options.delimiter) {
            self.inner.write_all(b"\"")?;
            self.inner
                .write_all(value.replace('"', "\"\"").as_bytes())?;
            self.inner.write_all(b"\"")?;
        } else {
            self.inner.write_all(value.as_bytes())?;
        }
        Ok(())
    }
}

fn needs_quoting(value: &str, delimiter: &str) -> bool {
    value.contains(delimiter)
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::BomKind;

    fn write_rows(rows: &[Row], options: WriteOptions) -> String {
        let mut writer = RowWriter::new(Vec::new(), options).unwrap();
        writer.write_all_rows(rows).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_plain_row() {
        let out = write_rows(&[Row::from_values(["a", "b", "c"])], WriteOptions::new());
        assert_eq!(out, "a,b,c\n");
    }

    #[test]
    fn test_quoting_only_when_needed() {
        let out = write_rows(
            &[Row::from_values(["plain", "with,comma", "with\nnewline"])],
            WriteOptions::new(),
        );
        assert_eq!(out, "plain,\"with,comma\",\"with\nnewline\"\n");
    }

    #[test]
    fn test_embedded_quotes_doubled() {
        let out = write_rows(&[Row::from_values(["say \"hi\""])], WriteOptions::new());
        assert_eq!(out, "\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_always_quote() {
        let out = write_rows(
            &[Row::from_values(["a", "b"])],
            WriteOptions::new().with_always_quote(true),
        );
        assert_eq!(out, "\"a\",\"b\"\n");
    }

    #[test]
    fn test_malformed_row_verbatim() {
        let out = write_rows(
            &[
                Row::from_values(["ok", "row"]),
                Row::malformed("\"broken,line"),
            ],
            WriteOptions::new(),
        );
        assert_eq!(out, "ok,row\n\"broken,line\n");
    }

    #[test]
    fn test_custom_delimiter_governs_quoting() {
        let out = write_rows(
            &[Row::from_values(["a,b", "c;d"])],
            WriteOptions::prn(),
        );
        assert_eq!(out, "a,b;\"c;d\"\n");
    }

    #[test]
    fn test_bom_emission() {
        let mut writer = RowWriter::new(
            Vec::new(),
            WriteOptions::new().with_write_bom(Some(BomKind::Utf8)),
        )
        .unwrap();
        writer.write_row(&Row::from_values(["x"])).unwrap();
        let bytes = writer.into_inner().unwrap();
        assert_eq!(bytes, b"\xEF\xBB\xBFx\n");
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        assert!(RowWriter::new(Vec::new(), WriteOptions::new().with_delimiter("")).is_err());
    }

    #[test]
    fn test_write_values_header_row() {
        let mut writer = RowWriter::new(Vec::new(), WriteOptions::new()).unwrap();
        writer.write_values(["name", "first,last"]).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out, "name,\"first,last\"\n");
    }
}
