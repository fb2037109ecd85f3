//! Syncable content: identifiers, entities and snapshots.

mod entity;
mod id;
mod snapshot;

pub use entity::{BlockContent, ContentEntity, EntityRef, MenuLinkContent, TaxonomyTerm};
pub use id::{parse_entity_type, ContentSyncId, EntityTypeKey, IdError};
pub use snapshot::EntitySnapshot;
pub(crate) use snapshot::{object_to_value, value_to_object};
