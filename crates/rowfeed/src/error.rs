//! Source error types

use std::error::Error as StdError;
use std::fmt;

use rowfeed_xlsx::XlsxError;
use thiserror::Error;

/// Result type for source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Broad category of a [`SourceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or invalid configuration; nothing was opened
    Configuration,
    /// The workbook opened but has no usable worksheet or row data
    Structural,
    /// The file could not be accessed (missing, locked, unreadable)
    Io,
    /// Anything else that went wrong while reading the document
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Structural => "structural error",
            ErrorKind::Io => "I/O error",
            ErrorKind::Unexpected => "unexpected error",
        };
        f.write_str(name)
    }
}

/// Errors that stop an extraction
#[derive(Debug, Error)]
pub enum SourceError {
    /// Invalid configuration (e.g. file path missing or not a file)
    #[error("{0}")]
    Configuration(String),

    /// Workbook has no worksheets, or the worksheet has no row data
    #[error("{0}")]
    Structural(String),

    /// File could not be accessed
    #[error("Error accessing Excel file (might be open?): {source}")]
    Io {
        #[source]
        source: XlsxError,
    },

    /// Any other failure while reading the document
    #[error("An error occurred: {source}")]
    Unexpected {
        #[source]
        source: XlsxError,
    },
}

impl SourceError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SourceError::Configuration(msg.into())
    }

    /// Create a structural error
    pub fn structural<S: Into<String>>(msg: S) -> Self {
        SourceError::Structural(msg.into())
    }

    /// The error's category
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::Configuration(_) => ErrorKind::Configuration,
            SourceError::Structural(_) => ErrorKind::Structural,
            SourceError::Io { .. } => ErrorKind::Io,
            SourceError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    /// Message for operators.
    ///
    /// Unexpected errors carry their cause chain; every other kind is the
    /// plain message. Causes whose text the message already shows are skipped.
    pub fn diagnostic(&self) -> String {
        let mut message = self.to_string();
        if let SourceError::Unexpected { source } = self {
            let mut cause = source.source();
            while let Some(err) = cause {
                let text = err.to_string();
                if !message.contains(&text) {
                    message.push_str("\nCaused by: ");
                    message.push_str(&text);
                }
                cause = err.source();
            }
        }
        message
    }
}

impl From<XlsxError> for SourceError {
    fn from(err: XlsxError) -> Self {
        if err.is_io() {
            SourceError::Io { source: err }
        } else {
            SourceError::Unexpected { source: err }
        }
    }
}
