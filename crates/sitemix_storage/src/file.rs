//! Directory-backed configuration storage.

use crate::backend::{ConfigObject, ConfigStorage};
use crate::error::{StorageError, StorageResult};
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File extension used for stored objects.
const EXTENSION: &str = "yml";

/// A configuration storage that keeps one YAML file per object.
///
/// The object `system.site` lives in `<dir>/system.site.yml`. This is the
/// layout of an exported configuration directory, so a `FileStorage` can be
/// pointed straight at one.
///
/// # Durability
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so readers never observe a half-written object.
///
/// # Example
///
/// ```no_run
/// use sitemix_storage::{ConfigObject, ConfigStorage, FileStorage};
/// use std::path::Path;
///
/// let mut storage = FileStorage::open(Path::new("config/sync")).unwrap();
/// storage.write("system.site", &ConfigObject::new()).unwrap();
/// ```
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Opens a storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> StorageResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }
}

fn validate_name(name: &str) -> StorageResult<()> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains("..")
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl ConfigStorage for FileStorage {
    fn read(&self, name: &str) -> StorageResult<Option<ConfigObject>> {
        let path = self.path_for(name)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            return Ok(Some(ConfigObject::new()));
        }

        serde_yaml::from_str(&text)
            .map(Some)
            .map_err(|e| StorageError::malformed(name, e))
    }

    fn write(&mut self, name: &str, data: &ConfigObject) -> StorageResult<()> {
        let path = self.path_for(name)?;
        let text = serde_yaml::to_string(data).map_err(|e| StorageError::malformed(name, e))?;

        let _guard = self.write_lock.lock();
        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&mut self, name: &str) -> StorageResult<bool> {
        let path = self.path_for(name)?;
        let _guard = self.write_lock.lock();
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list_all(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let suffix = format!(".{EXTENSION}");
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(&suffix) {
                if name.starts_with(prefix) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
