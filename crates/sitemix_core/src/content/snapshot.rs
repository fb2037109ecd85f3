//! Storage-independent entity snapshots.

use serde::{Deserialize, Serialize};
use sitemix_storage::ConfigObject;

/// A normalized attribute map describing one content entity.
///
/// Snapshots are opaque to the sync engine: it only moves them between the
/// codec and configuration storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntitySnapshot {
    fields: ConfigObject,
}

impl EntitySnapshot {
    /// Creates a snapshot from an attribute map.
    #[must_use]
    pub fn new(fields: ConfigObject) -> Self {
        Self { fields }
    }

    /// Returns true if the snapshot carries no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns one attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }

    /// Returns the attribute map.
    #[must_use]
    pub fn as_object(&self) -> &ConfigObject {
        &self.fields
    }

    /// Consumes the snapshot, returning the attribute map.
    #[must_use]
    pub fn into_object(self) -> ConfigObject {
        self.fields
    }
}

impl From<ConfigObject> for EntitySnapshot {
    fn from(fields: ConfigObject) -> Self {
        Self::new(fields)
    }
}

impl From<EntitySnapshot> for ConfigObject {
    fn from(snapshot: EntitySnapshot) -> Self {
        snapshot.fields
    }
}

/// Wraps an attribute map as a JSON object value.
pub(crate) fn object_to_value(object: ConfigObject) -> serde_json::Value {
    serde_json::Value::Object(object.into_iter().collect())
}

/// Unwraps a JSON object value into an attribute map.
pub(crate) fn value_to_object(value: serde_json::Value) -> Option<ConfigObject> {
    match value {
        serde_json::Value::Object(map) => Some(map.into_iter().collect()),
        _ => None,
    }
}
