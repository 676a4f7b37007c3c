//! Error types for rowfeed-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rowfeed-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid column letters
    #[error("Invalid column letters: {0}")]
    InvalidColumn(String),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),
}
