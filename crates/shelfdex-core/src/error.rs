//! Error types for Shelfdex core operations.
//!
//! This module defines well-structured error types using `thiserror`. File
//! failures are reported errors propagated to the caller. Lenient-parse
//! outcomes (truncated fields, short lines) and trie misses are deliberately
//! *not* errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ShelfdexError
pub type Result<T> = std::result::Result<T, ShelfdexError>;

/// Core error types for Shelfdex operations.
#[derive(Error, Debug)]
pub enum ShelfdexError {
    // === Catalog Errors ===
    /// The catalog file is missing or could not be found
    #[error("catalog not found at {path}")]
    CatalogNotFound { path: PathBuf },

    /// The catalog file's leading record-count line is unusable
    #[error("catalog header invalid: {reason}")]
    HeaderInvalid { reason: String },

    /// A book id does not address a slot in the catalog
    #[error("book id {id} out of range for catalog of {len} records")]
    InvalidId { id: u64, len: usize },

    // === Configuration Errors ===
    /// Configuration file parsing failed
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    // === I/O Errors ===
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShelfdexError {
    /// Returns true if this error means no catalog file exists yet,
    /// i.e. starting from an empty catalog is a reasonable fallback.
    pub fn is_missing_catalog(&self) -> bool {
        matches!(self, ShelfdexError::CatalogNotFound { .. })
    }

    /// Create a header error
    pub fn header(reason: impl Into<String>) -> Self {
        ShelfdexError::HeaderInvalid {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        ShelfdexError::ConfigError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing_catalog() {
        let err = ShelfdexError::CatalogNotFound {
            path: PathBuf::from("/test/books.db"),
        };
        assert!(err.is_missing_catalog());

        let err = ShelfdexError::header("not a number");
        assert!(!err.is_missing_catalog());
    }

    #[test]
    fn test_display() {
        let err = ShelfdexError::InvalidId { id: 9, len: 3 };
        assert_eq!(
            err.to_string(),
            "book id 9 out of range for catalog of 3 records"
        );
    }
}
