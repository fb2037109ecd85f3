//! CLI command implementations.

pub mod export;
pub mod generate;
pub mod ids;
pub mod ignore_check;
pub mod import;

use sitemix_core::{JsonContentCodec, MixSettings, StorageRepository};
use sitemix_storage::FileStorage;
use sitemix_sync_engine::{ContentSyncEngine, GenerateConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Live content persisted in a directory.
pub type LiveRepository = StorageRepository<FileStorage>;

/// Engine over directory-backed live content.
pub type SiteEngine = ContentSyncEngine<LiveRepository, JsonContentCodec<LiveRepository>>;

/// Directories making up a site.
#[derive(Debug, Clone)]
pub struct SitePaths {
    /// Active configuration.
    pub config: PathBuf,
    /// Staged configuration.
    pub sync: PathBuf,
    /// Live content.
    pub content: PathBuf,
}

impl SitePaths {
    /// Opens the active configuration storage.
    pub fn active_config(&self) -> Result<FileStorage, Box<dyn std::error::Error>> {
        Ok(FileStorage::open(&self.config)?)
    }

    /// Opens the staged configuration storage.
    pub fn sync_storage(&self) -> Result<FileStorage, Box<dyn std::error::Error>> {
        Ok(FileStorage::open(&self.sync)?)
    }

    /// Loads the site settings from the active configuration.
    pub fn settings(&self) -> Result<MixSettings, Box<dyn std::error::Error>> {
        Ok(MixSettings::load(&self.active_config()?)?)
    }

    /// Builds a sync engine over the live content directory.
    pub fn engine(&self, config: GenerateConfig) -> Result<SiteEngine, Box<dyn std::error::Error>> {
        let repository = Arc::new(StorageRepository::new(FileStorage::open(&self.content)?));
        let codec = JsonContentCodec::new(Arc::clone(&repository));
        Ok(ContentSyncEngine::with_config(repository, codec, config))
    }
}

/// Prints skipped identifiers.
pub fn print_skipped(skipped: &[sitemix_sync_engine::Skipped]) {
    for item in skipped {
        println!("  skipped {} ({})", item.id, item.reason);
    }
}
