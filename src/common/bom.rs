//! Byte Order Mark (BOM) utilities.
//!
//! Provides detection and writing helpers for the Unicode encodings found
//! at the head of delimited text files.

use crate::common::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Supported BOM encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BomKind {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl BomKind {
    /// Returns the byte representation of the BOM.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BomKind::Utf8 => &UTF8_BOM,
            BomKind::Utf16Le => &UTF16_LE_BOM,
            BomKind::Utf16Be => &UTF16_BE_BOM,
            BomKind::Utf32Le => &UTF32_LE_BOM,
            BomKind::Utf32Be => &UTF32_BE_BOM,
        }
    }

    /// Returns the length in bytes of the BOM.
    #[inline]
    #[allow(clippy::len_without_is_empty)] // No need to check for empty BOMs
    pub const fn len(&self) -> usize {
        self.as_bytes().len()
    }
}

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
/// UTF-32 little-endian BOM bytes.
pub const UTF32_LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
/// UTF-32 big-endian BOM bytes.
pub const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Detects a BOM at the start of `buf`.
///
/// Returns the BOM kind and its byte length. UTF-32 marks are checked
/// before UTF-16 because the UTF-32 LE mark shares its first two bytes
/// with the UTF-16 LE mark.
pub fn detect_bom(buf: &[u8]) -> Option<(BomKind, usize)> {
    if buf.len() >= UTF32_BE_BOM.len() {
        if buf[..UTF32_BE_BOM.len()] == UTF32_BE_BOM {
            return Some((BomKind::Utf32Be, UTF32_BE_BOM.len()));
        }
        if buf[..UTF32_LE_BOM.len()] == UTF32_LE_BOM {
            return Some((BomKind::Utf32Le, UTF32_LE_BOM.len()));
        }
    }

    if buf.len() >= UTF8_BOM.len() && buf[..UTF8_BOM.len()] == UTF8_BOM {
        return Some((BomKind::Utf8, UTF8_BOM.len()));
    }

    if buf.len() >= UTF16_BE_BOM.len() && buf[..UTF16_BE_BOM.len()] == UTF16_BE_BOM {
        return Some((BomKind::Utf16Be, UTF16_BE_BOM.len()));
    }
    if buf.len() >= UTF16_LE_BOM.len() && buf[..UTF16_LE_BOM.len()] == UTF16_LE_BOM {
        return Some((BomKind::Utf16Le, UTF16_LE_BOM.len()));
    }

    None
}

/// Writes the requested BOM to the writer.
pub fn write_bom<W: Write>(writer: &mut W, kind: BomKind) -> Result<()> {
    writer.write_all(kind.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_utf8_bom() {
        let buf = [0xEF, 0xBB, 0xBF, b'a'];
        assert_eq!(detect_bom(&buf), Some((BomKind::Utf8, 3)));
    }

    #[test]
    fn test_utf32_le_wins_over_utf16_le() {
        let buf = [0xFF, 0xFE, 0x00, 0x00];
        assert_eq!(detect_bom(&buf), Some((BomKind::Utf32Le, 4)));

        let buf = [0xFF, 0xFE, b'a', 0x00];
        assert_eq!(detect_bom(&buf), Some((BomKind::Utf16Le, 2)));
    }

    #[test]
    fn test_no_bom() {
        assert_eq!(detect_bom(b"abc,def"), None);
        assert_eq!(detect_bom(b""), None);
    }

    #[test]
    fn test_write_bom() {
        let mut out = Vec::new();
        write_bom(&mut out, BomKind::Utf8).unwrap();
        assert_eq!(out, UTF8_BOM);
    }
}
