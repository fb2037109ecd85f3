//! Run reports.

use sitemix_core::{ContentSyncId, IdError};
use std::fmt;

/// Why an identifier was passed over without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No entity type could be parsed.
    Unparsable,
    /// The entity type is not syncable.
    UnsupportedType,
    /// The identifier does not end in a UUID.
    InvalidUuid,
    /// No live entity has the UUID.
    EntityMissing,
    /// Staged storage holds no snapshot for the identifier.
    NoSnapshot,
}

impl From<&IdError> for SkipReason {
    fn from(err: &IdError) -> Self {
        match err {
            IdError::Unparsable(_) => SkipReason::Unparsable,
            IdError::UnsupportedType { .. } => SkipReason::UnsupportedType,
            IdError::InvalidUuid { .. } => SkipReason::InvalidUuid,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::Unparsable => "unparsable identifier",
            SkipReason::UnsupportedType => "unsupported entity type",
            SkipReason::InvalidUuid => "invalid UUID",
            SkipReason::EntityMissing => "entity not found",
            SkipReason::NoSnapshot => "no staged snapshot",
        };
        f.write_str(text)
    }
}

/// An identifier that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// The identifier as listed.
    pub id: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

impl Skipped {
    pub(crate) fn new(id: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            id: id.into(),
            reason,
        }
    }
}

/// Result of an export transform.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Identifiers whose snapshot was written, in write order.
    pub written: Vec<ContentSyncId>,
    /// Identifiers passed over.
    pub skipped: Vec<Skipped>,
}

/// Result of an import transform.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Identifiers with a usable staged snapshot.
    pub staged: Vec<ContentSyncId>,
    /// Identifiers passed over.
    pub skipped: Vec<Skipped>,
}

/// Result of generating missing content.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Entities created, in creation order.
    pub created: Vec<ContentSyncId>,
    /// Entities that already existed when saved.
    pub updated: Vec<ContentSyncId>,
    /// Identifiers whose live entity already existed.
    pub already_present: Vec<ContentSyncId>,
    /// Identifiers without a staged snapshot.
    pub missing_snapshot: Vec<ContentSyncId>,
    /// Identifiers given up on after exhausting their attempts.
    pub abandoned: Vec<ContentSyncId>,
    /// Identifiers that could not be parsed or are unsupported.
    pub skipped: Vec<Skipped>,
    /// Number of denormalize-and-save attempts made.
    pub attempts: usize,
}

impl GenerateReport {
    /// Returns true if nothing was abandoned.
    pub fn is_complete(&self) -> bool {
        self.abandoned.is_empty()
    }
}
