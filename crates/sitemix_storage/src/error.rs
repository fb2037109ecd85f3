//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A stored object could not be parsed or serialized.
    #[error("malformed configuration object {name}: {message}")]
    Malformed {
        /// Name of the offending object.
        name: String,
        /// Parser message.
        message: String,
    },

    /// The object name cannot be used as a storage key.
    #[error("invalid configuration name: {0:?}")]
    InvalidName(String),
}

impl StorageError {
    pub(crate) fn malformed(name: &str, err: impl std::fmt::Display) -> Self {
        Self::Malformed {
            name: name.to_string(),
            message: err.to_string(),
        }
    }
}
