//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Judge timeout of zero milliseconds.
    #[error("invalid judge timeout '{value}': must be at least 1 ms")]
    InvalidTimeout { value: String },

    /// Judge timeout string could not be parsed as a number.
    #[error("failed to parse judge timeout '{value}': {source}")]
    TimeoutParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Duplicate window capacity of zero.
    #[error("invalid duplicate capacity {value}: must be at least 1")]
    InvalidCapacity { value: usize },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
