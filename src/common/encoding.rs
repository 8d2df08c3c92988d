//! Character decoding for delimited text sources.
//!
//! Wraps a byte stream in an incremental `encoding_rs` decoder and yields
//! physical lines with their terminators stripped. The encoding is either
//! supplied by the caller or sniffed from a leading byte order mark,
//! falling back to UTF-8. UTF-32 marks are recognized and rejected rather
//! than silently misread as UTF-16.

use crate::common::bom::{self, BomKind};
use crate::common::{Error, Result};
use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8, UTF_16BE, UTF_16LE};
use memchr::memchr;
use std::io::Read;

const READ_CHUNK: usize = 8192;

/// Incremental line reader over a decoded byte stream.
///
/// Reads raw bytes in chunks, decodes them as they arrive, and hands out
/// one physical line at a time. Both `\n` and `\r\n` terminators are
/// accepted; a final line without a terminator is still returned.
pub struct LineReader<R: Read> {
    reader: R,
    decoder: Option<Decoder>,
    encoding: Option<&'static Encoding>,
    pending: String,
    eof: bool,
}

impl<R: Read> LineReader<R> {
    /// Wrap `reader`, decoding with `encoding` when given or sniffing the
    /// byte order mark on first read otherwise.
    pub fn new(reader: R, encoding: Option<&'static Encoding>) -> Self {
        LineReader {
            reader,
            decoder: None,
            encoding,
            pending: String::new(),
            eof: false,
        }
    }

    /// Returns the next physical line without its terminator, or `None` at
    /// the end of the input.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(idx) = memchr(b'\n', self.pending.as_bytes()) {
                let mut line: String = self.pending.drain(..=idx).collect();
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
                return Ok(Some(line));
            }
            if self.eof {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(std::mem::take(&mut self.pending)));
            }
            self.fill()?;
        }
    }

    /// Consume the reader and hand back the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        let mut n = self.reader.read(&mut chunk)?;

        if self.decoder.is_none() {
            // Buffer enough bytes up front to make the BOM check
            // conclusive; a short first read must not hide a 4-byte mark.
            while n < 4 {
                match self.reader.read(&mut chunk[n..])? {
                    0 => break,
                    m => n += m,
                }
            }
            let (encoding, skip) = self.resolve_encoding(&chunk[..n])?;
            self.decoder = Some(if self.encoding.is_some() {
                encoding.new_decoder_with_bom_removal()
            } else {
                encoding.new_decoder_without_bom_handling()
            });
            self.decode(&chunk[skip..n], n == 0);
            if n == 0 {
                self.eof = true;
            }
            return Ok(());
        }

        if n == 0 {
            self.decode(&[], true);
            self.eof = true;
        } else {
            self.decode(&chunk[..n], false);
        }
        Ok(())
    }

    fn resolve_encoding(&self, prefix: &[u8]) -> Result<(&'static Encoding, usize)> {
        if let Some(encoding) = self.encoding {
            return Ok((encoding, 0));
        }
        match bom::detect_bom(prefix) {
            Some((BomKind::Utf8, len)) => Ok((UTF_8, len)),
            Some((BomKind::Utf16Le, len)) => Ok((UTF_16LE, len)),
            Some((BomKind::Utf16Be, len)) => Ok((UTF_16BE, len)),
            Some((kind @ (BomKind::Utf32Le | BomKind::Utf32Be), _)) => Err(
                Error::UnsupportedEncoding(format!("{kind:?} input is not supported")),
            ),
            None => Ok((UTF_8, 0)),
        }
    }

    fn decode(&mut self, bytes: &[u8], last: bool) {
        let Some(decoder) = self.decoder.as_mut() else {
            return;
        };
        let mut consumed = 0;
        loop {
            let needed = decoder
                .max_utf8_buffer_length(bytes.len() - consumed)
                .unwrap_or(READ_CHUNK);
            self.pending.reserve(needed);
            let (result, read, _replaced) =
                decoder.decode_to_string(&bytes[consumed..], &mut self.pending, last);
            consumed += read;
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
    }
}
