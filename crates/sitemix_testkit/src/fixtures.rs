//! Entity builders and test sites.

use sitemix_core::{
    BlockContent, ContentEntity, ContentSyncId, InMemoryRepository, JsonContentCodec,
    MenuLinkContent, TaxonomyTerm,
};
use sitemix_storage::{FileStorage, InMemoryStorage};
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

/// Returns a deterministic UUID for `seed`.
pub fn uuid(seed: u128) -> Uuid {
    Uuid::from_u128(seed)
}

/// Builds an unsaved custom block.
pub fn block(seed: u128, info: &str) -> ContentEntity {
    BlockContent {
        id: None,
        uuid: uuid(seed),
        bundle: "basic".into(),
        info: info.into(),
        body: Some(format!("<p>{info}</p>")),
        langcode: "en".into(),
    }
    .into()
}

/// Builds an unsaved menu link in the `main` menu.
pub fn menu_link(seed: u128, title: &str, parent: Option<u128>) -> ContentEntity {
    MenuLinkContent {
        id: None,
        uuid: uuid(seed),
        title: title.into(),
        menu_name: "main".into(),
        link: format!("internal:/{}", title.to_lowercase()),
        parent: parent.map(uuid),
        weight: 0,
        enabled: true,
    }
    .into()
}

/// Builds an unsaved term in the `tags` vocabulary.
pub fn term(seed: u128, name: &str, parent: Option<u128>) -> ContentEntity {
    TaxonomyTerm {
        id: None,
        uuid: uuid(seed),
        vid: "tags".into(),
        name: name.into(),
        description: None,
        parent: parent.map(uuid),
        weight: 0,
    }
    .into()
}

/// Returns the canonical sync identifiers of `entities`, in order.
pub fn sync_ids(entities: &[ContentEntity]) -> Vec<String> {
    entities
        .iter()
        .map(|entity| entity.sync_id().to_string())
        .collect()
}

/// Returns the canonical sync identifier of one entity.
pub fn sync_id(entity: &ContentEntity) -> ContentSyncId {
    entity.sync_id()
}

/// A site with a live in-memory repository and staged in-memory storage.
pub struct TestSite {
    /// Live content.
    pub repository: Arc<InMemoryRepository>,
    /// Staged configuration.
    pub staged: InMemoryStorage,
}

impl TestSite {
    /// Creates an empty site.
    pub fn new() -> Self {
        Self::with_entities(Vec::new())
    }

    /// Creates a site whose live repository holds `entities`.
    pub fn with_entities(entities: impl IntoIterator<Item = ContentEntity>) -> Self {
        Self {
            repository: Arc::new(InMemoryRepository::with_entities(entities)),
            staged: InMemoryStorage::new(),
        }
    }

    /// Returns a codec resolving references against this site.
    pub fn codec(&self) -> JsonContentCodec<InMemoryRepository> {
        JsonContentCodec::new(Arc::clone(&self.repository))
    }
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

/// A staged configuration directory with automatic cleanup.
pub struct TestSyncDir {
    /// Storage rooted in the temporary directory.
    pub storage: FileStorage,
    _temp_dir: TempDir,
}

impl TestSyncDir {
    /// Creates an empty directory-backed storage.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let storage = FileStorage::open(temp_dir.path()).expect("Failed to open file storage");
        Self {
            storage,
            _temp_dir: temp_dir,
        }
    }
}

impl Default for TestSyncDir {
    fn default() -> Self {
        Self::new()
    }
}
