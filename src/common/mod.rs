//! Shared plumbing used across the crate.
//!
//! Provides the unified error type, byte-order-mark helpers, and the
//! decoded line reader the parsing layers are built on.

// Submodule declarations
pub mod bom;
pub mod encoding;
pub mod error;

// Re-exports for convenience
pub use bom::BomKind;
pub use encoding::LineReader;
pub use error::{Error, Result};
