//! Conversion between live entities and snapshots.

use crate::content::{
    object_to_value, value_to_object, ContentEntity, EntitySnapshot, EntityTypeKey,
};
use crate::error::{CodecError, CoreResult};
use crate::repository::EntityRepository;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Converts entities to and from storage-independent snapshots.
///
/// `denormalize` must fail with
/// [`CodecError::ReferencedEntityNotFound`] when the snapshot points at an
/// entity that does not exist yet; callers treat that kind as retryable and
/// every other failure as fatal.
pub trait ContentCodec: Send + Sync {
    /// Normalizes a live entity into a snapshot.
    fn normalize(&self, entity: &ContentEntity) -> CoreResult<EntitySnapshot>;

    /// Builds an unsaved entity of type `target` from a snapshot.
    fn denormalize(
        &self,
        snapshot: &EntitySnapshot,
        target: EntityTypeKey,
    ) -> CoreResult<ContentEntity>;
}

/// A codec that maps entity fields one-to-one onto snapshot attributes and
/// resolves parent references through a repository.
///
/// Numeric IDs are kept in snapshots but dropped on denormalize, so the
/// receiving site assigns its own.
pub struct JsonContentCodec<R: EntityRepository> {
    references: Arc<R>,
}

impl<R: EntityRepository> JsonContentCodec<R> {
    /// Creates a codec resolving references against `references`.
    pub fn new(references: Arc<R>) -> Self {
        Self { references }
    }

    fn check_references(&self, entity: &ContentEntity) -> CoreResult<()> {
        for reference in entity.references() {
            if self
                .references
                .load_by_uuid(reference.entity_type, reference.uuid)?
                .is_none()
            {
                return Err(CodecError::ReferencedEntityNotFound {
                    entity_type: reference.entity_type,
                    uuid: reference.uuid,
                }
                .into());
            }
        }
        Ok(())
    }
}

fn encode<T: Serialize>(entity: &ContentEntity, fields: &T) -> CoreResult<EntitySnapshot> {
    let normalize_error = |message: String| CodecError::Normalize {
        entity_type: entity.entity_type(),
        uuid: entity.uuid(),
        message,
    };
    let value = serde_json::to_value(fields).map_err(|e| normalize_error(e.to_string()))?;
    let object =
        value_to_object(value).ok_or_else(|| normalize_error("not an attribute map".into()))?;
    Ok(EntitySnapshot::new(object))
}

fn decode<T: DeserializeOwned>(snapshot: &EntitySnapshot, target: EntityTypeKey) -> CoreResult<T> {
    serde_json::from_value(object_to_value(snapshot.as_object().clone())).map_err(|e| {
        CodecError::Malformed {
            entity_type: target,
            message: e.to_string(),
        }
        .into()
    })
}

impl<R: EntityRepository> ContentCodec for JsonContentCodec<R> {
    fn normalize(&self, entity: &ContentEntity) -> CoreResult<EntitySnapshot> {
        match entity {
            ContentEntity::BlockContent(fields) => encode(entity, fields),
            ContentEntity::MenuLinkContent(fields) => encode(entity, fields),
            ContentEntity::TaxonomyTerm(fields) => encode(entity, fields),
        }
    }

    fn denormalize(
        &self,
        snapshot: &EntitySnapshot,
        target: EntityTypeKey,
    ) -> CoreResult<ContentEntity> {
        let mut entity: ContentEntity = match target {
            EntityTypeKey::BlockContent => ContentEntity::BlockContent(decode(snapshot, target)?),
            EntityTypeKey::MenuLinkContent => {
                ContentEntity::MenuLinkContent(decode(snapshot, target)?)
            }
            EntityTypeKey::TaxonomyTerm => ContentEntity::TaxonomyTerm(decode(snapshot, target)?),
        };
        entity.set_id(None);
        self.check_references(&entity)?;
        Ok(entity)
    }
}
