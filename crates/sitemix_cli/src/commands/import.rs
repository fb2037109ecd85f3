//! Import command implementation.

use super::SitePaths;
use serde::Serialize;
use sitemix_core::{ConfigImportIgnore, IgnoreRule};
use sitemix_storage::{ConfigStorage, InMemoryStorage};
use sitemix_sync_engine::GenerateConfig;
use std::collections::BTreeSet;
use tracing::info;

/// Serializable import summary.
#[derive(Debug, Default, Serialize)]
pub struct ImportSummary {
    /// Content identifiers with a staged snapshot.
    pub staged_content: Vec<String>,
    /// Content identifiers skipped, with reasons.
    pub skipped_content: Vec<(String, String)>,
    /// Staged configuration rewritten by the ignore filter.
    pub ignored: Vec<String>,
    /// Configuration that still differs from the active site.
    pub changed: Vec<String>,
}

/// Prepares the sync directory for import.
///
/// With `dry_run` the ignore filter runs against a scratch copy and the sync
/// directory is left untouched.
pub fn execute(paths: &SitePaths, dry_run: bool) -> Result<ImportSummary, Box<dyn std::error::Error>> {
    info!("Preparing import from {:?}", paths.sync);
    let settings = paths.settings()?;
    let active = paths.active_config()?;
    let mut staged = paths.sync_storage()?;

    let engine = paths.engine(GenerateConfig::default())?;
    let report = engine.import_transform(&settings, &staged)?;

    let mut summary = ImportSummary {
        staged_content: report.staged.iter().map(ToString::to_string).collect(),
        skipped_content: report
            .skipped
            .iter()
            .map(|s| (s.id.clone(), s.reason.to_string()))
            .collect(),
        ..ImportSummary::default()
    };

    let ignore = ConfigImportIgnore::from_settings(&settings.config_import_ignore);
    if dry_run {
        let names: BTreeSet<&str> = ignore.rules().iter().map(IgnoreRule::name).collect();
        let mut scratch = InMemoryStorage::new();
        for name in names {
            if let Some(object) = staged.read(name)? {
                scratch.write(name, &object)?;
            }
        }
        summary.ignored = ignore.apply(&active, &mut scratch)?;
    } else {
        summary.ignored = ignore.apply(&active, &mut staged)?;
    }

    let content: BTreeSet<String> = report.staged.iter().map(ToString::to_string).collect();
    let mut names: BTreeSet<String> = active.list_all("")?.into_iter().collect();
    names.extend(staged.list_all("")?);
    for name in names {
        if content.contains(&name) {
            continue;
        }
        if ignore.differs(&active, &staged, &name)? {
            summary.changed.push(name);
        }
    }

    Ok(summary)
}

/// Runs the import command.
pub fn run(paths: &SitePaths, dry_run: bool, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let summary = execute(paths, dry_run)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} content item(s) staged for generation", summary.staged_content.len());
    for id in &summary.staged_content {
        println!("  {id}");
    }
    for (id, reason) in &summary.skipped_content {
        println!("  skipped {id} ({reason})");
    }

    let verb = if dry_run { "would keep" } else { "kept" };
    for name in &summary.ignored {
        println!("Ignore filter {verb} active values for {name}");
    }

    if summary.changed.is_empty() {
        println!("The staged configuration is identical to the active configuration.");
    } else {
        println!("Configuration changes to import:");
        for name in &summary.changed {
            println!("  {name}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::temp_site;
    use serde_json::json;
    use sitemix_core::{ConfigImportIgnoreSettings, MixSettings};
    use sitemix_storage::ConfigObject;

    fn object(value: serde_json::Value) -> ConfigObject {
        serde_json::from_value(value).unwrap()
    }

    fn setup(ignore: &[&str]) -> (tempfile::TempDir, SitePaths) {
        let (root, paths) = temp_site();
        let mut active = paths.active_config().unwrap();
        active
            .write("system.site", &object(json!({"name": "Live", "slogan": ""})))
            .unwrap();
        let mut settings = MixSettings {
            config_import_ignore: ConfigImportIgnoreSettings {
                mode: true,
                list: ignore.iter().map(|s| s.to_string()).collect(),
            },
            ..MixSettings::default()
        };
        settings.save(&mut active).unwrap();

        let mut staged = paths.sync_storage().unwrap();
        staged
            .write("system.site", &object(json!({"name": "Dev", "slogan": ""})))
            .unwrap();
        settings.save(&mut staged).unwrap();
        (root, paths)
    }

    #[test]
    fn ignored_keys_hide_differences() {
        let (_root, paths) = setup(&["system.site:name"]);

        let summary = execute(&paths, false).unwrap();
        assert_eq!(summary.ignored, vec!["system.site"]);
        assert!(summary.changed.is_empty());

        let staged = paths.sync_storage().unwrap();
        let site = staged.read("system.site").unwrap().unwrap();
        assert_eq!(site["name"], json!("Live"));
    }

    #[test]
    fn dry_run_leaves_sync_directory_alone() {
        let (_root, paths) = setup(&["system.site:name"]);

        let summary = execute(&paths, true).unwrap();
        assert_eq!(summary.ignored, vec!["system.site"]);
        assert!(summary.changed.is_empty());

        let staged = paths.sync_storage().unwrap();
        let site = staged.read("system.site").unwrap().unwrap();
        assert_eq!(site["name"], json!("Dev"));
    }

    #[test]
    fn unlisted_changes_are_reported() {
        let (_root, paths) = setup(&[]);
        let summary = execute(&paths, false).unwrap();
        assert!(summary.ignored.is_empty());
        assert_eq!(summary.changed, vec!["system.site"]);
    }
}
