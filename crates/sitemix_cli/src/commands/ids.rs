//! Sync list commands.

use super::SitePaths;
use sitemix_core::{normalize_sync_ids, ContentSyncId, MixSettings};

fn update(
    paths: &SitePaths,
    edit: impl FnOnce(&mut MixSettings),
) -> Result<MixSettings, Box<dyn std::error::Error>> {
    let mut active = paths.active_config()?;
    let mut settings = MixSettings::load(&active)?;
    edit(&mut settings);
    settings.save(&mut active)?;
    Ok(settings)
}

/// Prints the sync list.
pub fn list(paths: &SitePaths) -> Result<(), Box<dyn std::error::Error>> {
    let settings = paths.settings()?;
    let visible = if settings.content_sync_enabled() { "yes" } else { "no" };
    println!("Content sync IDs shown: {visible}");
    for raw in &settings.content_sync_ids {
        match ContentSyncId::parse(raw) {
            Ok(id) => println!("  {raw} [{}]", id.entity_type()),
            Err(e) => println!("  {raw} (ignored: {e})"),
        }
    }
    Ok(())
}

/// Adds identifiers to the sync list.
pub fn add(paths: &SitePaths, ids: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    for raw in ids {
        if let Err(e) = ContentSyncId::parse(raw.trim()) {
            println!("Warning: {e}; it will be skipped during sync");
        }
    }
    let settings = update(paths, |settings| {
        settings.content_sync_ids.extend(ids.iter().cloned());
    })?;
    println!("Sync list has {} entr(ies)", settings.content_sync_ids.len());
    Ok(())
}

/// Removes identifiers from the sync list.
pub fn remove(paths: &SitePaths, ids: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let removing = normalize_sync_ids(ids);
    let settings = update(paths, |settings| {
        settings
            .content_sync_ids
            .retain(|id| !removing.iter().any(|r| r == id.trim()));
    })?;
    println!("Sync list has {} entr(ies)", settings.content_sync_ids.len());
    Ok(())
}

/// Rewrites the sync list in normalized form.
pub fn normalize(paths: &SitePaths) -> Result<(), Box<dyn std::error::Error>> {
    let settings = update(paths, |_| {})?;
    println!("Sync list has {} entr(ies)", settings.content_sync_ids.len());
    Ok(())
}
