//! Quince - a Rust library for reading and writing delimited flat files
//!
//! This library provides quote-aware parsing and serialization of delimited
//! text formats (CSV, TSV, PRN, pipe-separated), automatic delimiter
//! detection, and an in-memory table facade for callers that do not need
//! streaming semantics.
//!
//! # Features
//!
//! - **Streaming reads**: lazy, forward-only row iteration over files,
//!   byte buffers, or any `Read` stream
//! - **Quote handling**: double-quote enclosure with doubled-quote escaping
//! - **Malformed-line recovery**: lines that fail tokenizing are preserved
//!   verbatim as error rows instead of aborting the parse
//! - **Delimiter detection**: bounded, position-restoring row sampling over
//!   a candidate set
//! - **Encoding support**: byte-order-mark sniffing for UTF-8 and UTF-16
//!   sources, defaulting to UTF-8
//! - **Table facade**: fully materialized rows with header capture and
//!   load-time consistency flags
//!
//! # Example - Streaming rows
//!
//! ```rust,no_run
//! use quince::delimited::{ReadOptions, RowReader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = RowReader::open("data.csv", &ReadOptions::csv())?;
//! for row in reader {
//!     let row = row?;
//!     if let Some(raw) = row.raw_line() {
//!         eprintln!("line {:?} is malformed: {raw}", row.line_number());
//!     } else {
//!         println!("{:?}", row.values());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Loading a table with delimiter detection
//!
//! ```rust,no_run
//! use quince::delimited::{ReadOptions, Table};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ReadOptions::new().with_auto_delimiter();
//! let table = Table::load_path("export.txt", &options)?;
//!
//! println!("delimiter: {:?}", table.delimiter());
//! println!("headers: {:?}", table.headers());
//! println!("{} rows, errors: {}", table.rows().len(), table.has_errors());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Writing
//!
//! ```rust
//! use quince::delimited::{Row, RowWriter, WriteOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut writer = RowWriter::new(Vec::new(), WriteOptions::new())?;
//! writer.write_row(&Row::from_values(["a", "b,c"]))?;
//! let bytes = writer.into_inner()?;
//! assert_eq!(bytes, b"a,\"b,c\"\n");
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod delimited;

// Re-exports for convenience
pub use common::{BomKind, Error, Result};
pub use delimited::{
    Cell, DelimiterDetector, DetectorOptions, ReadOptions, Row, RowKind, RowReader, RowWriter,
    Table, WriteOptions,
};
