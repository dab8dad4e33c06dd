//! Error types for the undoc library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for undoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction and persistence.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when probing files or writing derived artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source file did not exist when metadata was probed.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The file extension does not map to a supported container format.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The format-library binding failed to produce its document model.
    #[error("Source error: {0}")]
    Source(String),

    /// Database error from the relational sink.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Table-grid serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A query was invoked with an invalid selector combination.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// No stored document matched the query selector.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::FileNotFound(PathBuf::from("missing.pdf"));
        assert_eq!(err.to_string(), "File not found: missing.pdf");

        let err = Error::UnsupportedFormat(".odt".to_string());
        assert_eq!(err.to_string(), "Unsupported document format: .odt");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
