//! Property-based test generators.
//!
//! Strategies for producing content sync identifiers, valid and invalid.

use proptest::prelude::*;
use sitemix_core::EntityTypeKey;
use uuid::Uuid;

/// Strategy for arbitrary UUIDs.
pub fn uuid_strategy() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

/// Strategy for the syncable entity types.
pub fn entity_type_strategy() -> impl Strategy<Value = EntityTypeKey> {
    prop::sample::select(EntityTypeKey::ALL.to_vec())
}

/// Strategy for well-formed identifiers of syncable types.
pub fn supported_sync_id_strategy() -> impl Strategy<Value = String> {
    (entity_type_strategy(), uuid_strategy())
        .prop_map(|(key, uuid)| format!("{}{}", key.id_prefix(), uuid))
}

/// Strategy for well-formed identifiers of types that are not syncable.
pub fn unsupported_sync_id_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z_]{0,15}", uuid_strategy())
        .prop_filter("type must not be syncable", |(name, _)| {
            EntityTypeKey::from_name(name).is_none()
        })
        .prop_map(|(name, uuid)| format!("{name}.{uuid}"))
}

/// Strategy for arbitrary strings that may or may not be identifiers.
pub fn any_sync_id_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        supported_sync_id_strategy(),
        unsupported_sync_id_strategy(),
        "[a-z._-]{0,40}",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitemix_core::ContentSyncId;

    proptest! {
        #[test]
        fn supported_ids_parse(raw in supported_sync_id_strategy()) {
            prop_assert!(ContentSyncId::parse(&raw).is_ok());
        }

        #[test]
        fn unsupported_ids_do_not_parse(raw in unsupported_sync_id_strategy()) {
            prop_assert!(ContentSyncId::parse(&raw).is_err());
        }
    }
}
