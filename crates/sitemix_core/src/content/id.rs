//! Content sync identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Prefix used by taxonomy term identifiers instead of `taxonomy_term.`.
///
/// Taxonomy terms are the only type whose identifier carries a three-segment
/// key. The irregular form is kept because existing sync lists use it.
const TAXONOMY_TERM_PREFIX: &str = "taxonomy.term.";

/// The closed set of entity types that can travel with configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityTypeKey {
    /// Custom block content.
    BlockContent,
    /// Custom menu link.
    MenuLinkContent,
    /// Taxonomy term.
    TaxonomyTerm,
}

impl EntityTypeKey {
    /// Every supported type.
    pub const ALL: [EntityTypeKey; 3] = [
        EntityTypeKey::BlockContent,
        EntityTypeKey::MenuLinkContent,
        EntityTypeKey::TaxonomyTerm,
    ];

    /// Returns the machine name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityTypeKey::BlockContent => "block_content",
            EntityTypeKey::MenuLinkContent => "menu_link_content",
            EntityTypeKey::TaxonomyTerm => "taxonomy_term",
        }
    }

    /// Looks up a type by machine name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Returns the identifier prefix for this type, dot included.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            EntityTypeKey::BlockContent => "block_content.",
            EntityTypeKey::MenuLinkContent => "menu_link_content.",
            EntityTypeKey::TaxonomyTerm => TAXONOMY_TERM_PREFIX,
        }
    }
}

impl fmt::Display for EntityTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons an identifier string cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// No entity type could be read from the identifier.
    #[error("cannot parse an entity type from {0:?}")]
    Unparsable(String),

    /// The entity type is not one of the syncable types.
    #[error("unsupported entity type {entity_type:?} in {raw:?}")]
    UnsupportedType {
        /// The identifier as given.
        raw: String,
        /// The parsed type name.
        entity_type: String,
    },

    /// The trailing segment is not a UUID.
    #[error("invalid UUID {uuid:?} in {raw:?}")]
    InvalidUuid {
        /// The identifier as given.
        raw: String,
        /// The trailing segment.
        uuid: String,
    },
}

/// Extracts the raw entity type name from an identifier.
///
/// Identifiers starting with `taxonomy.term.` map to `taxonomy_term`;
/// every other identifier uses the text before its first dot. Returns `None`
/// when that text is empty or there is no dot at all.
#[must_use]
pub fn parse_entity_type(raw: &str) -> Option<&str> {
    if raw.starts_with(TAXONOMY_TERM_PREFIX) {
        return Some(EntityTypeKey::TaxonomyTerm.as_str());
    }
    match raw.split_once('.') {
        Some((entity_type, _)) if !entity_type.is_empty() => Some(entity_type),
        _ => None,
    }
}

/// A validated content sync identifier.
///
/// The identifier keeps its original spelling, which is also the name of
/// the staged configuration object holding the entity snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentSyncId {
    raw: String,
    entity_type: EntityTypeKey,
    uuid: Uuid,
}

impl ContentSyncId {
    /// Parses and validates an identifier.
    ///
    /// # Errors
    ///
    /// Returns an [`IdError`] when the type cannot be parsed, is not
    /// supported, or the text after the last dot is not a UUID.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        let type_name =
            parse_entity_type(raw).ok_or_else(|| IdError::Unparsable(raw.to_string()))?;
        let entity_type =
            EntityTypeKey::from_name(type_name).ok_or_else(|| IdError::UnsupportedType {
                raw: raw.to_string(),
                entity_type: type_name.to_string(),
            })?;

        let uuid_part = raw.rsplit_once('.').map_or("", |(_, tail)| tail);
        let uuid = Uuid::parse_str(uuid_part).map_err(|_| IdError::InvalidUuid {
            raw: raw.to_string(),
            uuid: uuid_part.to_string(),
        })?;

        Ok(Self {
            raw: raw.to_string(),
            entity_type,
            uuid,
        })
    }

    /// Builds the canonical identifier for an entity.
    #[must_use]
    pub fn for_entity(entity_type: EntityTypeKey, uuid: Uuid) -> Self {
        Self {
            raw: format!("{}{}", entity_type.id_prefix(), uuid),
            entity_type,
            uuid,
        }
    }

    /// Returns the identifier as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the entity type.
    #[must_use]
    pub fn entity_type(&self) -> EntityTypeKey {
        self.entity_type
    }

    /// Returns the entity UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl fmt::Display for ContentSyncId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ContentSyncId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ContentSyncId {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
