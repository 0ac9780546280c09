//! Error types for the data-loader crate.
//!
//! Every failure here happens once, at startup, while the movie table and
//! similarity matrix are read. Nothing in this crate fails after load.

use thiserror::Error;

/// Errors that can occur while loading the movie table and similarity matrix
///
/// The `#[derive(Error)]` macro from thiserror implements `std::error::Error`
/// and `Display` from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A matrix row does not have as many scores as the matrix has rows
    #[error("Expected {expected} scores but found {found} in row {row}")]
    RowLengthMismatch {
        expected: usize,
        found: usize,
        row: usize,
    },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
