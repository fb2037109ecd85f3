//! Error types for sitemix core.

use crate::content::EntityTypeKey;
use thiserror::Error;
use uuid::Uuid;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while converting entities to and from snapshots.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The snapshot references an entity that does not exist yet.
    #[error("no {entity_type} entity found with UUID {uuid}")]
    ReferencedEntityNotFound {
        /// Type of the missing entity.
        entity_type: EntityTypeKey,
        /// UUID of the missing entity.
        uuid: Uuid,
    },

    /// The snapshot does not describe a valid entity of the target type.
    #[error("malformed {entity_type} snapshot: {message}")]
    Malformed {
        /// Target entity type.
        entity_type: EntityTypeKey,
        /// Decoder message.
        message: String,
    },

    /// The entity could not be normalized.
    #[error("cannot normalize {entity_type} {uuid}: {message}")]
    Normalize {
        /// Entity type.
        entity_type: EntityTypeKey,
        /// Entity UUID.
        uuid: Uuid,
        /// Encoder message.
        message: String,
    },
}

/// Errors that can occur in sitemix core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration storage error.
    #[error("storage error: {0}")]
    Storage(#[from] sitemix_storage::StorageError),

    /// Snapshot codec error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// A stored entity record could not be decoded.
    #[error("corrupt entity record {name}: {message}")]
    CorruptRecord {
        /// Storage name of the record.
        name: String,
        /// Decoder message.
        message: String,
    },

    /// Persisted settings could not be decoded or encoded.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl CoreError {
    /// Returns true if this error means a referenced entity is not present
    /// yet, so the same work may succeed once that entity has been created.
    pub fn is_referenced_entity_missing(&self) -> bool {
        matches!(
            self,
            CoreError::Codec(CodecError::ReferencedEntityNotFound { .. })
        )
    }
}
