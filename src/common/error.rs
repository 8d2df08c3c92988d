//! Unified error types for quince operations.

use thiserror::Error;

/// Main error type for quince operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid configuration or argument, rejected before any I/O
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Delimiter auto-detection found zero or several plausible candidates
    #[error("Delimiter detection failed: {0}")]
    DelimiterUndetectable(String),

    /// Encoding the decoder cannot handle
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),
}

/// Result type for quince operations.
pub type Result<T> = std::result::Result<T, Error>;
