//! Ready-made content generation scenarios.

use crate::fixtures::{menu_link, term};
use sitemix_core::{ContentCodec, ContentEntity, CoreResult};
use sitemix_storage::ConfigStorage;

/// Seed of the first entity in a chain.
const CHAIN_BASE: u128 = 0x1000;

/// Seed of a parent that never exists.
const MISSING_PARENT: u128 = 0xdead;

/// Builds `len` menu links where each link is the child of the previous
/// one. The first link has no parent.
pub fn menu_chain(len: usize) -> Vec<ContentEntity> {
    (0..len)
        .map(|i| {
            let seed = CHAIN_BASE + i as u128;
            let parent = (i > 0).then(|| seed - 1);
            menu_link(seed, &format!("Link {i}"), parent)
        })
        .collect()
}

/// Builds `len` taxonomy terms where each term is the child of the previous
/// one. The first term has no parent.
pub fn term_chain(len: usize) -> Vec<ContentEntity> {
    (0..len)
        .map(|i| {
            let seed = CHAIN_BASE + 0x100 + i as u128;
            let parent = (i > 0).then(|| seed - 1);
            term(seed, &format!("Term {i}"), parent)
        })
        .collect()
}

/// Builds a menu link whose parent will never exist.
pub fn orphan_link(seed: u128) -> ContentEntity {
    menu_link(seed, "Orphan", Some(MISSING_PARENT))
}

/// Builds two menu links that are each other's parent.
///
/// Neither can be created before the other, so generation never converges.
pub fn mutual_links(first: u128, second: u128) -> [ContentEntity; 2] {
    [
        menu_link(first, "Cycle A", Some(second)),
        menu_link(second, "Cycle B", Some(first)),
    ]
}

/// Writes a snapshot of each entity into `staged` under its sync identifier.
///
/// # Errors
///
/// Returns an error if normalization or storage fails.
pub fn stage_snapshots<C, S>(codec: &C, staged: &mut S, entities: &[ContentEntity]) -> CoreResult<()>
where
    C: ContentCodec + ?Sized,
    S: ConfigStorage + ?Sized,
{
    for entity in entities {
        let snapshot = codec.normalize(entity)?;
        staged.write(entity.sync_id().as_str(), snapshot.as_object())?;
    }
    Ok(())
}
