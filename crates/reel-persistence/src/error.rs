//! Error types for store operations.

use std::path::PathBuf;

use reel_models::ModelError;
use thiserror::Error;

/// Errors that can occur in the project store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read from file system.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to file system.
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize or parse JSON.
    #[error("failed to serialize: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to create directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backing file exists but could not be read or parsed.
    #[error("malformed storage at {path}: {reason}")]
    MalformedStorage { path: PathBuf, reason: String },

    /// Item not found.
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// Every project identifier has been handed out.
    #[error("identifier space exhausted")]
    IdsExhausted,

    /// Expense amount is not a positive, finite number.
    #[error("invalid expense amount: {0}")]
    InvalidAmount(f64),

    /// Rejected by the project aggregate.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
