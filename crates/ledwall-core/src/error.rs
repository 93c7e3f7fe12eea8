//! Error handling for LEDWall
//!
//! Geometry and placement operations are total and never return errors.
//! The types here cover the fallible edges of the system:
//! - Catalog errors (reference data ingestion)
//! - Document errors (layout documents crossing the persistence boundary)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Reference catalog error type
///
/// Represents errors raised while loading reference data tables.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// Unknown equipment category name
    #[error("Unknown equipment category: {name}")]
    UnknownCategory {
        /// The category name that could not be matched.
        name: String,
    },

    /// A table does not carry the identifying column of its category
    #[error("Table for {category} is missing identifying column '{column}'")]
    MissingIdColumn {
        /// The category of the table.
        category: String,
        /// The expected identifying column.
        column: String,
    },

    /// The catalog source has an unexpected shape
    #[error("Malformed catalog: {reason}")]
    Malformed {
        /// The reason the catalog is malformed.
        reason: String,
    },
}

/// Layout document error type
///
/// Represents errors related to saving and loading layout documents.
#[derive(Error, Debug, Clone)]
pub enum DocumentError {
    /// Document not found in the store
    #[error("Layout document not found: {id}")]
    NotFound {
        /// The identifier that was not found.
        id: String,
    },

    /// Document written by an unsupported format version
    #[error("Unsupported layout format version {version}")]
    UnsupportedVersion {
        /// The version string found in the document.
        version: String,
    },

    /// Invalid document identifier
    #[error("Invalid document id: {id}")]
    InvalidId {
        /// The rejected identifier.
        id: String,
    },
}

/// Main error type for LEDWall
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Check if this is a catalog error
    pub fn is_catalog_error(&self) -> bool {
        matches!(self, Error::Catalog(_))
    }

    /// Check if this is a missing-document error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Document(DocumentError::NotFound { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::MissingIdColumn {
            category: "Screen".to_string(),
            column: "Screen MFR".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Table for Screen is missing identifying column 'Screen MFR'"
        );

        let err = DocumentError::NotFound {
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Layout document not found: abc");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = DocumentError::NotFound {
            id: "abc".to_string(),
        }
        .into();
        assert!(err.is_not_found());
        assert!(!err.is_catalog_error());

        let err: Error = CatalogError::UnknownCategory {
            name: "cables".to_string(),
        }
        .into();
        assert!(err.is_catalog_error());
    }
}
