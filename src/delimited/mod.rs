//! Delimited flat-file support (CSV, TSV, PRN, pipe-separated).
//!
//! This module implements the crate's core: quote-aware tokenizing of
//! delimited text, lazy row streaming, serialization, delimiter
//! auto-detection, and a materialized table facade.
//!
//! # Architecture
//!
//! - [`cell`] - single field values with typed accessors
//! - [`row`] - rows as parsed cells or preserved malformed lines
//! - [`options`] - read/write/detection configuration
//! - [`tokenizer`] - per-line field splitting with quote handling
//! - [`reader`] - lazy `Iterator`-based row streaming
//! - [`writer`] - row serialization with minimal or forced quoting
//! - [`detector`] - delimiter detection by bounded row sampling
//! - [`table`] - in-memory table with load-time consistency flags
//!
//! # Example
//!
//! ```rust
//! use quince::delimited::{ReadOptions, Table};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = Table::load_bytes("name,age\nJohn,25\nJane,30\n", &ReadOptions::csv())?;
//! assert_eq!(table.headers(), Some(&["name".to_string(), "age".to_string()][..]));
//! assert_eq!(table.rows().len(), 2);
//! assert_eq!(table.rows()[0].cell(1).and_then(|c| c.as_i32()), Some(25));
//! # Ok(())
//! # }
//! ```

pub mod cell;
pub mod detector;
pub mod options;
pub mod reader;
pub mod row;
pub mod table;
pub(crate) mod tokenizer;
pub mod writer;

// Re-export main types for easy access
pub use cell::Cell;
pub use detector::DelimiterDetector;
pub use options::{DetectorOptions, ReadOptions, WriteOptions};
pub use reader::RowReader;
pub use row::{Row, RowKind, column_index, column_label};
pub use table::Table;
pub use writer::RowWriter;
