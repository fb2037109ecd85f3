//! Live entity repositories.

use crate::content::{
    object_to_value, value_to_object, ContentEntity, ContentSyncId, EntityTypeKey,
};
use crate::error::{CoreError, CoreResult};
use parking_lot::RwLock;
use sitemix_storage::ConfigStorage;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Outcome of persisting an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The entity did not exist and was created.
    New,
    /// An entity with the same UUID was replaced.
    Updated,
}

/// Access to the live (active) content of a site.
pub trait EntityRepository: Send + Sync {
    /// Loads the live entity of `entity_type` with `uuid`.
    ///
    /// Returns `Ok(None)` when no such entity exists.
    fn load_by_uuid(
        &self,
        entity_type: EntityTypeKey,
        uuid: Uuid,
    ) -> CoreResult<Option<ContentEntity>>;

    /// Persists an entity, creating it when its UUID is unknown.
    ///
    /// New entities are given a fresh site-local ID; any ID carried by the
    /// entity is ignored.
    fn save(&self, entity: ContentEntity) -> CoreResult<SaveOutcome>;
}

/// An in-memory entity repository.
///
/// # Example
///
/// ```rust
/// use sitemix_core::{BlockContent, EntityRepository, EntityTypeKey, InMemoryRepository, SaveOutcome};
/// use uuid::Uuid;
///
/// let repo = InMemoryRepository::new();
/// let block = BlockContent {
///     id: None,
///     uuid: Uuid::new_v4(),
///     bundle: "basic".into(),
///     info: "Footer".into(),
///     body: None,
///     langcode: "en".into(),
/// };
/// let uuid = block.uuid;
/// assert_eq!(repo.save(block.into()).unwrap(), SaveOutcome::New);
/// assert!(repo.load_by_uuid(EntityTypeKey::BlockContent, uuid).unwrap().is_some());
/// ```
#[derive(Debug)]
pub struct InMemoryRepository {
    entities: RwLock<BTreeMap<(EntityTypeKey, Uuid), ContentEntity>>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a repository holding `entities`.
    #[must_use]
    pub fn with_entities(entities: impl IntoIterator<Item = ContentEntity>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.entities.write();
            for mut entity in entities {
                entity.set_id(Some(repo.next_id.fetch_add(1, Ordering::SeqCst)));
                map.insert((entity.entity_type(), entity.uuid()), entity);
            }
        }
        repo
    }

    /// Returns the number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }

    /// Returns true if an entity with this type and UUID exists.
    #[must_use]
    pub fn contains(&self, entity_type: EntityTypeKey, uuid: Uuid) -> bool {
        self.entities.read().contains_key(&(entity_type, uuid))
    }

    /// Returns a copy of every stored entity.
    #[must_use]
    pub fn entities(&self) -> Vec<ContentEntity> {
        self.entities.read().values().cloned().collect()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRepository for InMemoryRepository {
    fn load_by_uuid(
        &self,
        entity_type: EntityTypeKey,
        uuid: Uuid,
    ) -> CoreResult<Option<ContentEntity>> {
        Ok(self.entities.read().get(&(entity_type, uuid)).cloned())
    }

    fn save(&self, mut entity: ContentEntity) -> CoreResult<SaveOutcome> {
        let key = (entity.entity_type(), entity.uuid());
        let mut entities = self.entities.write();
        match entities.get(&key).and_then(ContentEntity::id) {
            Some(existing_id) => {
                entity.set_id(Some(existing_id));
                entities.insert(key, entity);
                Ok(SaveOutcome::Updated)
            }
            None => {
                entity.set_id(Some(self.next_id.fetch_add(1, Ordering::SeqCst)));
                entities.insert(key, entity);
                Ok(SaveOutcome::New)
            }
        }
    }
}

/// An entity repository persisted in a configuration storage.
///
/// Each entity is stored as one object named by its canonical sync
/// identifier, tagged with its `entity_type`.
#[derive(Debug)]
pub struct StorageRepository<S: ConfigStorage> {
    storage: RwLock<S>,
}

impl<S: ConfigStorage> StorageRepository<S> {
    /// Wraps a storage.
    pub fn new(storage: S) -> Self {
        Self {
            storage: RwLock::new(storage),
        }
    }

    /// Returns the underlying storage.
    pub fn into_inner(self) -> S {
        self.storage.into_inner()
    }

    /// Lists every stored entity of `entity_type`.
    pub fn list(&self, entity_type: EntityTypeKey) -> CoreResult<Vec<ContentEntity>> {
        let storage = self.storage.read();
        let mut entities = Vec::new();
        for name in storage.list_all(entity_type.id_prefix())? {
            if let Some(entity) = decode_record(&*storage, &name)? {
                entities.push(entity);
            }
        }
        Ok(entities)
    }

    fn next_id(&self, entity_type: EntityTypeKey) -> CoreResult<u64> {
        let max = self
            .list(entity_type)?
            .iter()
            .filter_map(ContentEntity::id)
            .max()
            .unwrap_or(0);
        Ok(max + 1)
    }
}

fn decode_record<S: ConfigStorage + ?Sized>(
    storage: &S,
    name: &str,
) -> CoreResult<Option<ContentEntity>> {
    let Some(object) = storage.read(name)? else {
        return Ok(None);
    };
    serde_json::from_value(object_to_value(object))
        .map(Some)
        .map_err(|e| CoreError::CorruptRecord {
            name: name.to_string(),
            message: e.to_string(),
        })
}

impl<S: ConfigStorage> EntityRepository for StorageRepository<S> {
    fn load_by_uuid(
        &self,
        entity_type: EntityTypeKey,
        uuid: Uuid,
    ) -> CoreResult<Option<ContentEntity>> {
        let name = ContentSyncId::for_entity(entity_type, uuid);
        decode_record(&*self.storage.read(), name.as_str())
    }

    fn save(&self, mut entity: ContentEntity) -> CoreResult<SaveOutcome> {
        let name = entity.sync_id();
        let outcome = match self.load_by_uuid(entity.entity_type(), entity.uuid())? {
            Some(existing) => {
                entity.set_id(existing.id());
                SaveOutcome::Updated
            }
            None => {
                entity.set_id(Some(self.next_id(entity.entity_type())?));
                SaveOutcome::New
            }
        };

        let record = serde_json::to_value(&entity)
            .ok()
            .and_then(value_to_object)
            .ok_or_else(|| CoreError::CorruptRecord {
                name: name.to_string(),
                message: "entity did not serialize to an object".into(),
            })?;
        self.storage.write().write(name.as_str(), &record)?;
        Ok(outcome)
    }
}
