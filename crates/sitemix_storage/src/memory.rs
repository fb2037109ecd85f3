//! In-memory configuration storage for testing.

use crate::backend::{ConfigObject, ConfigStorage};
use crate::error::StorageResult;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-memory configuration storage.
///
/// This storage keeps all objects in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Dry runs that must not touch disk
///
/// # Thread Safety
///
/// This storage is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use sitemix_storage::{ConfigObject, ConfigStorage, InMemoryStorage};
///
/// let mut storage = InMemoryStorage::new();
/// storage.write("a.b", &ConfigObject::new()).unwrap();
/// assert!(storage.exists("a.b").unwrap());
/// assert_eq!(storage.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    objects: RwLock<BTreeMap<String, ConfigObject>>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with `objects`.
    #[must_use]
    pub fn with_objects(objects: impl IntoIterator<Item = (String, ConfigObject)>) -> Self {
        Self {
            objects: RwLock::new(objects.into_iter().collect()),
        }
    }

    /// Returns the number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Returns a copy of every stored object.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, ConfigObject> {
        self.objects.read().clone()
    }

    /// Removes all objects.
    pub fn clear(&mut self) {
        self.objects.write().clear();
    }
}

impl ConfigStorage for InMemoryStorage {
    fn read(&self, name: &str) -> StorageResult<Option<ConfigObject>> {
        Ok(self.objects.read().get(name).cloned())
    }

    fn write(&mut self, name: &str, data: &ConfigObject) -> StorageResult<()> {
        self.objects.write().insert(name.to_string(), data.clone());
        Ok(())
    }

    fn delete(&mut self, name: &str) -> StorageResult<bool> {
        Ok(self.objects.write().remove(name).is_some())
    }

    fn list_all(&self, prefix: &str) -> StorageResult<Vec<String>> {
        Ok(self
            .objects
            .read()
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }
}
