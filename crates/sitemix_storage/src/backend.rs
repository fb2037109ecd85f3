//! Configuration storage trait definition.

use crate::error::StorageResult;
use std::collections::BTreeMap;

/// A single configuration object: an ordered attribute map.
pub type ConfigObject = BTreeMap<String, serde_json::Value>;

/// A named configuration storage.
///
/// Storages are **opaque object stores**. They read and write whole objects
/// by name and never look inside them.
///
/// # Invariants
///
/// - `read` returns exactly the object last passed to `write` for that name
/// - `write` replaces any previous object of the same name
/// - `list_all` returns names in ascending order
///
/// # Implementors
///
/// - [`super::InMemoryStorage`] - For testing
/// - [`super::FileStorage`] - For persistent storage
pub trait ConfigStorage: Send + Sync {
    /// Reads the object stored under `name`.
    ///
    /// Returns `Ok(None)` when no such object exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the object exists but cannot be read or parsed.
    fn read(&self, name: &str) -> StorageResult<Option<ConfigObject>>;

    /// Writes `data` under `name`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or an I/O error occurs.
    fn write(&mut self, name: &str, data: &ConfigObject) -> StorageResult<()>;

    /// Deletes the object stored under `name`.
    ///
    /// Returns `true` if an object was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn delete(&mut self, name: &str) -> StorageResult<bool>;

    /// Lists object names starting with `prefix`, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be enumerated.
    fn list_all(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Returns true if an object is stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be queried.
    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.read(name)?.is_some())
    }
}
