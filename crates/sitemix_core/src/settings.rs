//! Persisted site settings.

use crate::content::{object_to_value, value_to_object};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use sitemix_storage::ConfigStorage;
use std::collections::BTreeSet;

/// Name of the configuration object holding [`MixSettings`].
pub const SETTINGS_NAME: &str = "mix.settings";

/// Custom error page settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPageSettings {
    /// Whether the custom error page is served.
    pub mode: bool,
    /// Markup of the error page.
    pub content: String,
}

/// Settings of the configuration import ignore filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigImportIgnoreSettings {
    /// Whether the filter is active.
    pub mode: bool,
    /// Entries of the form `config_name` or `config_name:key.path`.
    pub list: Vec<String>,
}

/// Site administration settings.
///
/// Every field falls back to its default when missing from storage, so
/// partially written settings still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixSettings {
    /// Development mode switch.
    pub dev_mode: bool,
    /// Hide the revision field on content forms.
    pub hide_revision_field: bool,
    /// Strip the `X-Generator` response header.
    pub remove_x_generator: bool,
    /// Free-text environment banner; empty hides it.
    pub environment_indicator: String,
    /// Custom error page.
    pub error_page: ErrorPageSettings,
    /// Show content sync identifiers on content pages.
    pub show_content_sync_id: bool,
    /// Identifiers of content exported with configuration.
    pub content_sync_ids: Vec<String>,
    /// Configuration import ignore filter.
    pub config_import_ignore: ConfigImportIgnoreSettings,
}

impl MixSettings {
    /// Loads settings from `storage`, returning defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored object cannot be read or decoded.
    pub fn load<S: ConfigStorage + ?Sized>(storage: &S) -> CoreResult<Self> {
        match storage.read(SETTINGS_NAME)? {
            Some(object) => serde_json::from_value(object_to_value(object))
                .map_err(|e| CoreError::InvalidSettings(e.to_string())),
            None => Ok(Self::default()),
        }
    }

    /// Normalizes the sync list and writes the settings to `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be encoded or written.
    pub fn save<S: ConfigStorage + ?Sized>(&mut self, storage: &mut S) -> CoreResult<()> {
        self.content_sync_ids = normalize_sync_ids(&self.content_sync_ids);
        let object = serde_json::to_value(&*self)
            .ok()
            .and_then(value_to_object)
            .ok_or_else(|| CoreError::InvalidSettings("settings are not an attribute map".into()))?;
        storage.write(SETTINGS_NAME, &object)?;
        Ok(())
    }

    /// Returns true if content sync identifiers are shown to administrators.
    #[must_use]
    pub fn content_sync_enabled(&self) -> bool {
        self.show_content_sync_id
    }
}

/// Cleans a sync list: trims entries, drops blanks, removes duplicates and
/// sorts the result.
#[must_use]
pub fn normalize_sync_ids<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    ids.iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A read-only source of content sync identifiers.
pub trait SyncListSource {
    /// Returns the identifiers in processing order.
    fn content_sync_ids(&self) -> Vec<String>;
}

impl SyncListSource for MixSettings {
    fn content_sync_ids(&self) -> Vec<String> {
        self.content_sync_ids.clone()
    }
}

impl<S: AsRef<str>> SyncListSource for [S] {
    fn content_sync_ids(&self) -> Vec<String> {
        self.iter().map(|id| id.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> SyncListSource for Vec<S> {
    fn content_sync_ids(&self) -> Vec<String> {
        self.as_slice().content_sync_ids()
    }
}
