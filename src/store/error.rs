//! Config store error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Rejected configuration changes.
pub enum ConfigStoreError {
    /// No threshold or rule with this name.
    #[error("unknown configuration item: {name}")]
    NotFound { name: String },

    /// Value is outside the item's allowed range.
    #[error("value {value} for '{name}' is outside [{min}, {max}]")]
    OutOfBounds {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite value.
    #[error("value for '{name}' must be finite, got {value}")]
    NonFinite { name: String, value: f64 },

    /// Range mode bounds would no longer satisfy `min < max`.
    #[error("range mode minimum {min} must be below maximum {max}")]
    InvalidRange { min: f64, max: f64 },

    /// Snapshot failed validation; nothing was applied.
    #[error("invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    /// Durable storage failed (only surfaced by explicit `flush`).
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Convenience result type for config store operations.
pub type ConfigStoreResult<T> = Result<T, ConfigStoreError>;

#[derive(Debug, Error)]
/// Errors returned by [`ConfigPersistence`](super::ConfigPersistence) backends.
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("corrupt change log {path} at line {line}: {message}")]
    CorruptLog {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
