//! Error types for the sync engine.

use sitemix_core::CoreError;
use sitemix_storage::StorageError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that abort a sync run.
///
/// Skips never surface here; see [`crate::SkipReason`].
#[derive(Error, Debug)]
pub enum SyncError {
    /// Staged storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository or codec failure not tied to one identifier.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Processing one identifier failed in a way that is not retried.
    #[error("content {id} failed: {source}")]
    Content {
        /// The identifier being processed.
        id: String,
        /// Underlying failure.
        #[source]
        source: CoreError,
    },
}

impl SyncError {
    pub(crate) fn content(id: &str, source: CoreError) -> Self {
        Self::Content {
            id: id.to_string(),
            source,
        }
    }

    /// Returns the identifier that failed, if the error is tied to one.
    pub fn content_id(&self) -> Option<&str> {
        match self {
            SyncError::Content { id, .. } => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SyncError::content(
            "block_content.x",
            CoreError::InvalidSettings("bad".into()),
        );
        assert_eq!(err.content_id(), Some("block_content.x"));
        assert!(err.to_string().contains("block_content.x"));

        let err = SyncError::from(StorageError::InvalidName("../x".into()));
        assert_eq!(err.content_id(), None);
        assert!(err.to_string().starts_with("storage error"));
    }
}
