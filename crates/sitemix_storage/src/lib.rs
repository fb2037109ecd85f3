//! # sitemix storage
//!
//! Named configuration storage for sitemix.
//!
//! A configuration storage holds **configuration objects**: string-keyed
//! mappings addressed by a dotted name such as `system.site` or
//! `block_content.0b9d...`. Storages know nothing about what the objects mean;
//! the content-sync engine uses them both for live configuration and for the
//! staged (exported) copy.
//!
//! ## Available Backends
//!
//! - [`InMemoryStorage`] - For testing and ephemeral runs
//! - [`FileStorage`] - One YAML file per object in a directory
//!
//! ## Example
//!
//! ```rust
//! use sitemix_storage::{ConfigObject, ConfigStorage, InMemoryStorage};
//!
//! let mut storage = InMemoryStorage::new();
//! let mut data = ConfigObject::new();
//! data.insert("name".into(), "Drupal".into());
//! storage.write("system.site", &data).unwrap();
//! assert_eq!(storage.read("system.site").unwrap(), Some(data));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::{ConfigObject, ConfigStorage};
pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use memory::InMemoryStorage;
