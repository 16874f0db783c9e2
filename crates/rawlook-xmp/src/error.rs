//! XMP sidecar error types.

use thiserror::Error;

/// Result type for sidecar operations.
pub type XmpResult<T> = Result<T, XmpError>;

/// Errors that can occur while reading a sidecar.
#[derive(Debug, Error)]
pub enum XmpError {
    /// Malformed XML.
    #[error("parse error: {0}")]
    ParseError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
