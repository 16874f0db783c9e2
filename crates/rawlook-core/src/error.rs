//! Error types for rawlook-core operations.
//!
//! The core crate only fails while serializing or writing a finished
//! document; everything upstream of that is modeled as `Option` (a missing
//! develop property is not an error) or as crate-local errors in the parser
//! and engine crates.
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::document::PresetDocument`] - JSON output
//! - `rawlook-cli` - surfaces these through `anyhow` context

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
///
/// Convenience alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while producing preset output.
#[derive(Debug, Error)]
pub enum Error {
    /// JSON serialization failed.
    ///
    /// Wraps [`serde_json::Error`]; also covers I/O failures from the
    /// underlying writer when streaming a document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this is a serialization error.
    #[inline]
    pub fn is_json_error(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Returns `true` if this is an I/O error.
    #[inline]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.is_io_error());
        assert!(err.to_string().contains("file not found"));
    }
}
