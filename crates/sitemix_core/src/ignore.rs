//! Configuration import ignore filter.
//!
//! Lets a site keep local values for selected configuration when a staged
//! configuration set is imported. An entry `system.site` keeps the whole
//! object; `system.site:page.front` keeps one nested key.

use crate::content::{object_to_value, value_to_object};
use crate::error::CoreResult;
use crate::settings::ConfigImportIgnoreSettings;
use serde_json::{Map, Value};
use sitemix_storage::{ConfigObject, ConfigStorage};
use std::collections::BTreeSet;

/// One ignore entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreRule {
    /// Ignore a whole configuration object.
    Object {
        /// Configuration name.
        name: String,
    },
    /// Ignore one value inside a configuration object.
    Key {
        /// Configuration name.
        name: String,
        /// Dotted key path, split into segments.
        path: Vec<String>,
    },
}

impl IgnoreRule {
    /// Parses `name` or `name:key.path`; returns `None` for malformed entries.
    #[must_use]
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        match entry.split_once(':') {
            None if !entry.is_empty() => Some(IgnoreRule::Object {
                name: entry.to_string(),
            }),
            None => None,
            Some((name, key)) => {
                let path: Vec<String> = key.split('.').map(str::to_string).collect();
                if name.is_empty() || path.iter().any(String::is_empty) {
                    return None;
                }
                Some(IgnoreRule::Key {
                    name: name.to_string(),
                    path,
                })
            }
        }
    }

    /// Returns the configuration name the rule applies to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            IgnoreRule::Object { name } | IgnoreRule::Key { name, .. } => name,
        }
    }
}

/// The active set of ignore rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigImportIgnore {
    rules: Vec<IgnoreRule>,
}

impl ConfigImportIgnore {
    /// Builds the filter from settings; a disabled filter has no rules.
    #[must_use]
    pub fn from_settings(settings: &ConfigImportIgnoreSettings) -> Self {
        if !settings.mode {
            return Self::default();
        }
        Self::from_entries(settings.list.as_slice())
    }

    /// Builds the filter from raw entries, skipping malformed ones.
    #[must_use]
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Self {
        let rules = entries
            .iter()
            .filter_map(|entry| {
                let rule = IgnoreRule::parse(entry.as_ref());
                if rule.is_none() {
                    tracing::debug!(entry = entry.as_ref(), "ignoring malformed ignore entry");
                }
                rule
            })
            .collect();
        Self { rules }
    }

    /// Returns the parsed rules.
    #[must_use]
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// Returns true if at least one rule is in force.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Returns the staged object for `name` with every matching rule
    /// applied, taking ignored values from `active`.
    #[must_use]
    pub fn filter_object(
        &self,
        name: &str,
        active: Option<&ConfigObject>,
        mut staged: Option<ConfigObject>,
    ) -> Option<ConfigObject> {
        for rule in self.rules.iter().filter(|rule| rule.name() == name) {
            match rule {
                IgnoreRule::Object { .. } => staged = active.cloned(),
                IgnoreRule::Key { path, .. } => {
                    if let Some(object) = staged.as_mut() {
                        let value = active.and_then(|a| lookup(a, path)).cloned();
                        set_path(object, path, value);
                    }
                }
            }
        }
        staged
    }

    /// Rewrites `staged` so ignored configuration matches `active`.
    ///
    /// Returns the names of the staged objects that changed.
    ///
    /// # Errors
    ///
    /// Returns an error if either storage fails.
    pub fn apply<A, S>(&self, active: &A, staged: &mut S) -> CoreResult<Vec<String>>
    where
        A: ConfigStorage + ?Sized,
        S: ConfigStorage + ?Sized,
    {
        let names: BTreeSet<&str> = self.rules.iter().map(IgnoreRule::name).collect();
        let mut changed = Vec::new();
        for name in names {
            let current = staged.read(name)?;
            let filtered = self.filter_object(name, active.read(name)?.as_ref(), current.clone());
            if filtered == current {
                continue;
            }
            match &filtered {
                Some(object) => staged.write(name, object)?,
                None => {
                    staged.delete(name)?;
                }
            }
            tracing::debug!(name, "kept active configuration during import");
            changed.push(name.to_string());
        }
        Ok(changed)
    }

    /// Returns true if `name` still differs between the two storages once
    /// the ignore rules are taken into account.
    ///
    /// # Errors
    ///
    /// Returns an error if either storage fails.
    pub fn differs<A, S>(&self, active: &A, staged: &S, name: &str) -> CoreResult<bool>
    where
        A: ConfigStorage + ?Sized,
        S: ConfigStorage + ?Sized,
    {
        let active_object = active.read(name)?;
        let filtered = self.filter_object(name, active_object.as_ref(), staged.read(name)?);
        Ok(filtered != active_object)
    }
}

fn lookup<'a>(object: &'a ConfigObject, path: &[String]) -> Option<&'a Value> {
    let (head, rest) = path.split_first()?;
    let mut value = object.get(head)?;
    for segment in rest {
        value = value.as_object()?.get(segment)?;
    }
    Some(value)
}

fn set_path(object: &mut ConfigObject, path: &[String], value: Option<Value>) {
    let mut root = object_to_value(std::mem::take(object));
    set_in_value(&mut root, path, value);
    *object = value_to_object(root).unwrap_or_default();
}

fn set_in_value(container: &mut Value, path: &[String], value: Option<Value>) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    if !container.is_object() {
        if value.is_none() {
            return;
        }
        *container = Value::Object(Map::new());
    }
    let Value::Object(map) = container else {
        return;
    };

    if rest.is_empty() {
        match value {
            Some(v) => {
                map.insert(head.clone(), v);
            }
            None => {
                map.remove(head);
            }
        }
        return;
    }

    match map.get_mut(head) {
        Some(child) => set_in_value(child, rest, value),
        None => {
            if let Some(v) = value {
                let mut child = Value::Object(Map::new());
                set_in_value(&mut child, rest, Some(v));
                map.insert(head.clone(), child);
            }
        }
    }
}
