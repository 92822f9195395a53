//! Error types for the datastore.

use thiserror::Error;

/// Errors that can occur in the persistence layer.
#[derive(Debug, Error)]
pub enum DatastoreError {
    /// Backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file held invalid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No record with the requested ID.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request data failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Result type for datastore operations.
pub type Result<T> = std::result::Result<T, DatastoreError>;
