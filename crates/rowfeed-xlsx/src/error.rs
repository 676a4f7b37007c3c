//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX reading
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Invalid file format
    #[error("Invalid XLSX format: {0}")]
    InvalidFormat(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

impl XlsxError {
    /// Whether the failure came from accessing the file itself (missing,
    /// locked, unreadable) rather than from its content.
    pub fn is_io(&self) -> bool {
        match self {
            XlsxError::Io(_) => true,
            XlsxError::Zip(zip::result::ZipError::Io(_)) => true,
            XlsxError::Xml(quick_xml::Error::Io(_)) => true,
            _ => false,
        }
    }
}
