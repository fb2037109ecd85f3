//! Ignore-check command implementation.

use super::SitePaths;
use serde::Serialize;
use sitemix_core::ConfigImportIgnore;
use sitemix_storage::ConfigStorage;
use std::collections::BTreeSet;

/// Import status of one configuration object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoreCheck {
    /// Configuration name.
    pub name: String,
    /// Whether an ignore rule names this object.
    pub ignored: bool,
    /// Whether importing would still change the active object.
    pub differs: bool,
}

/// Checks `names` (or every known object when empty) against the ignore
/// filter without writing anything.
pub fn execute(
    paths: &SitePaths,
    names: &[String],
) -> Result<Vec<IgnoreCheck>, Box<dyn std::error::Error>> {
    let settings = paths.settings()?;
    let active = paths.active_config()?;
    let staged = paths.sync_storage()?;
    let ignore = ConfigImportIgnore::from_settings(&settings.config_import_ignore);

    let names: BTreeSet<String> = if names.is_empty() {
        let mut all: BTreeSet<String> = active.list_all("")?.into_iter().collect();
        all.extend(staged.list_all("")?);
        all
    } else {
        names.iter().cloned().collect()
    };

    let mut checks = Vec::with_capacity(names.len());
    for name in names {
        let ignored = ignore.rules().iter().any(|rule| rule.name() == name);
        let differs = ignore.differs(&active, &staged, &name)?;
        checks.push(IgnoreCheck {
            name,
            ignored,
            differs,
        });
    }
    Ok(checks)
}

/// Runs the ignore-check command.
pub fn run(
    paths: &SitePaths,
    names: &[String],
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let checks = execute(paths, names)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&checks)?);
        return Ok(());
    }

    for check in &checks {
        let status = if check.differs { "changed" } else { "unchanged" };
        let marker = if check.ignored { " (ignore rule)" } else { "" };
        println!("{:<40} {status}{marker}", check.name);
    }
    Ok(())
}
