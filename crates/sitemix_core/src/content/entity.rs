//! Concrete content entities.

use super::id::{ContentSyncId, EntityTypeKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_langcode() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

/// A reusable custom block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContent {
    /// Site-local numeric ID, assigned on first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Stable identity shared across environments.
    pub uuid: Uuid,
    /// Block type (bundle).
    #[serde(rename = "type")]
    pub bundle: String,
    /// Administrative label.
    pub info: String,
    /// Body markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Language code.
    #[serde(default = "default_langcode")]
    pub langcode: String,
}

/// A custom menu link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLinkContent {
    /// Site-local numeric ID, assigned on first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Stable identity shared across environments.
    pub uuid: Uuid,
    /// Link text.
    pub title: String,
    /// Menu the link belongs to.
    pub menu_name: String,
    /// Target URI.
    pub link: String,
    /// UUID of the parent menu link, if nested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Uuid>,
    /// Sort weight among siblings.
    #[serde(default)]
    pub weight: i32,
    /// Whether the link is shown.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// A taxonomy term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    /// Site-local numeric ID, assigned on first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Stable identity shared across environments.
    pub uuid: Uuid,
    /// Vocabulary machine name.
    pub vid: String,
    /// Term name.
    pub name: String,
    /// Description markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// UUID of the parent term, if nested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Uuid>,
    /// Sort weight among siblings.
    #[serde(default)]
    pub weight: i32,
}

/// A reference from one entity to another, by UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// Referenced entity type.
    pub entity_type: EntityTypeKey,
    /// Referenced entity UUID.
    pub uuid: Uuid,
}

/// Any syncable content entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity_type", rename_all = "snake_case")]
pub enum ContentEntity {
    /// A custom block.
    BlockContent(BlockContent),
    /// A custom menu link.
    MenuLinkContent(MenuLinkContent),
    /// A taxonomy term.
    TaxonomyTerm(TaxonomyTerm),
}

impl ContentEntity {
    /// Returns the entity type.
    #[must_use]
    pub fn entity_type(&self) -> EntityTypeKey {
        match self {
            ContentEntity::BlockContent(_) => EntityTypeKey::BlockContent,
            ContentEntity::MenuLinkContent(_) => EntityTypeKey::MenuLinkContent,
            ContentEntity::TaxonomyTerm(_) => EntityTypeKey::TaxonomyTerm,
        }
    }

    /// Returns the entity UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        match self {
            ContentEntity::BlockContent(e) => e.uuid,
            ContentEntity::MenuLinkContent(e) => e.uuid,
            ContentEntity::TaxonomyTerm(e) => e.uuid,
        }
    }

    /// Returns the site-local numeric ID, if saved.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        match self {
            ContentEntity::BlockContent(e) => e.id,
            ContentEntity::MenuLinkContent(e) => e.id,
            ContentEntity::TaxonomyTerm(e) => e.id,
        }
    }

    /// Sets the site-local numeric ID.
    pub fn set_id(&mut self, id: Option<u64>) {
        match self {
            ContentEntity::BlockContent(e) => e.id = id,
            ContentEntity::MenuLinkContent(e) => e.id = id,
            ContentEntity::TaxonomyTerm(e) => e.id = id,
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            ContentEntity::BlockContent(e) => &e.info,
            ContentEntity::MenuLinkContent(e) => &e.title,
            ContentEntity::TaxonomyTerm(e) => &e.name,
        }
    }

    /// Returns the entities this one points at.
    #[must_use]
    pub fn references(&self) -> Vec<EntityRef> {
        match self {
            ContentEntity::BlockContent(_) => Vec::new(),
            ContentEntity::MenuLinkContent(e) => e
                .parent
                .map(|uuid| EntityRef {
                    entity_type: EntityTypeKey::MenuLinkContent,
                    uuid,
                })
                .into_iter()
                .collect(),
            ContentEntity::TaxonomyTerm(e) => e
                .parent
                .map(|uuid| EntityRef {
                    entity_type: EntityTypeKey::TaxonomyTerm,
                    uuid,
                })
                .into_iter()
                .collect(),
        }
    }

    /// Returns the canonical sync identifier of this entity.
    #[must_use]
    pub fn sync_id(&self) -> ContentSyncId {
        ContentSyncId::for_entity(self.entity_type(), self.uuid())
    }
}

impl From<BlockContent> for ContentEntity {
    fn from(entity: BlockContent) -> Self {
        ContentEntity::BlockContent(entity)
    }
}

impl From<MenuLinkContent> for ContentEntity {
    fn from(entity: MenuLinkContent) -> Self {
        ContentEntity::MenuLinkContent(entity)
    }
}

impl From<TaxonomyTerm> for ContentEntity {
    fn from(entity: TaxonomyTerm) -> Self {
        ContentEntity::TaxonomyTerm(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn term(parent: Option<Uuid>) -> ContentEntity {
        TaxonomyTerm {
            id: Some(4),
            uuid: Uuid::from_u128(7),
            vid: "tags".into(),
            name: "Rust".into(),
            description: None,
            parent,
            weight: 0,
        }
        .into()
    }

    #[test]
    fn accessors() {
        let mut entity = term(None);
        assert_eq!(entity.entity_type(), EntityTypeKey::TaxonomyTerm);
        assert_eq!(entity.uuid(), Uuid::from_u128(7));
        assert_eq!(entity.label(), "Rust");
        assert_eq!(entity.id(), Some(4));

        entity.set_id(None);
        assert_eq!(entity.id(), None);
        assert!(entity.sync_id().as_str().starts_with("taxonomy.term."));
    }

    #[test]
    fn references_follow_parent() {
        assert!(term(None).references().is_empty());

        let parent = Uuid::from_u128(1);
        assert_eq!(
            term(Some(parent)).references(),
            vec![EntityRef {
                entity_type: EntityTypeKey::TaxonomyTerm,
                uuid: parent
            }]
        );
    }

    #[test]
    fn tagged_serialization() {
        let block: ContentEntity = BlockContent {
            id: None,
            uuid: Uuid::from_u128(2),
            bundle: "basic".into(),
            info: "Footer".into(),
            body: None,
            langcode: "en".into(),
        }
        .into();

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["entity_type"], json!("block_content"));
        assert_eq!(value["type"], json!("basic"));
        assert!(value.get("id").is_none());

        let back: ContentEntity = serde_json::from_value(value).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn menu_link_defaults() {
        let link: MenuLinkContent = serde_json::from_value(json!({
            "uuid": Uuid::from_u128(3),
            "title": "Home",
            "menu_name": "main",
            "link": "internal:/",
        }))
        .unwrap();
        assert!(link.enabled);
        assert_eq!(link.weight, 0);
        assert_eq!(link.parent, None);
    }
}
