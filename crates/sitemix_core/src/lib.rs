//! # sitemix core
//!
//! Content model and collaborators for sitemix content synchronization.
//!
//! This crate provides:
//! - Content sync identifiers and the closed set of syncable entity types
//! - Concrete content entities (custom blocks, menu links, taxonomy terms)
//! - Storage-independent entity snapshots
//! - The [`EntityRepository`] and [`ContentCodec`] capabilities with
//!   in-memory, storage-backed and JSON implementations
//! - Persisted site settings ([`MixSettings`]) and sync-list normalization
//! - The configuration import ignore filter
//!
//! ## Identifier format
//!
//! A content sync identifier is `{entity_type}.{uuid}`, except taxonomy
//! terms which use `taxonomy.term.{uuid}`:
//!
//! ```rust
//! use sitemix_core::{ContentSyncId, EntityTypeKey};
//!
//! let id = ContentSyncId::parse("taxonomy.term.3f2c5b36-54f8-4d3e-9a0e-0d7a8c1f2b44").unwrap();
//! assert_eq!(id.entity_type(), EntityTypeKey::TaxonomyTerm);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod content;
mod error;
mod ignore;
mod repository;
mod settings;

pub use codec::{ContentCodec, JsonContentCodec};
pub use content::{
    parse_entity_type, BlockContent, ContentEntity, ContentSyncId, EntityRef, EntitySnapshot,
    EntityTypeKey, IdError, MenuLinkContent, TaxonomyTerm,
};
pub use error::{CodecError, CoreError, CoreResult};
pub use ignore::{ConfigImportIgnore, IgnoreRule};
pub use repository::{EntityRepository, InMemoryRepository, SaveOutcome, StorageRepository};
pub use settings::{
    normalize_sync_ids, ConfigImportIgnoreSettings, ErrorPageSettings, MixSettings,
    SyncListSource, SETTINGS_NAME,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
