//! Config operations on a loaded store, and the result type callers display.
//!
//! Provides the logic behind `config show`, `config list`, `config get`,
//! `config set` and `config unset`. File access stays in
//! [`ConfigHandler::handle`](crate::ConfigHandler::handle); everything here
//! works on an in-memory [`ConfigStore`].

use std::fmt;
use std::path::PathBuf;

use crate::error::InifigError;
use crate::store::{ConfigStore, DEFAULT_SECTION};

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// Confirmation that the config was regenerated from its template.
    Synced { path: PathBuf, sections: usize },
    /// A rendered document (INI or JSON).
    Rendered(String),
    /// Resolved entries of one section.
    Listing {
        section: String,
        entries: Vec<(String, String)>,
    },
    /// A single resolved value.
    KeyValue {
        section: String,
        key: String,
        value: String,
    },
    /// Confirmation that a value was persisted.
    ValueSet {
        section: String,
        key: String,
        value: String,
    },
    /// Confirmation that a value was removed.
    ValueUnset { section: String, key: String },
    /// Where the template for this config is expected.
    TemplatePath(PathBuf),
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Synced { path, sections } => write!(
                f,
                "Synced {} ({sections} sections)",
                path.display()
            ),
            ConfigResult::Rendered(text) => write!(f, "{}", text.trim_end()),
            ConfigResult::Listing { entries, .. } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ConfigResult::KeyValue { key, value, .. } => write!(f, "{key} = {value}"),
            ConfigResult::ValueSet {
                section,
                key,
                value,
            } => write!(f, "Set {section}.{key} = {value}"),
            ConfigResult::ValueUnset { section, key } => write!(f, "Unset {section}.{key}"),
            ConfigResult::TemplatePath(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Render the whole store as INI text, or as pretty JSON when `json` is set.
pub fn render(store: &ConfigStore, json: bool) -> Result<ConfigResult, InifigError> {
    if !json {
        return Ok(ConfigResult::Rendered(store.to_string()));
    }
    let text = serde_json::to_string_pretty(store)?;
    Ok(ConfigResult::Rendered(text))
}

/// List the resolved entries of a section, sorted by key.
pub fn list_section(store: &ConfigStore, section: &str) -> Result<ConfigResult, InifigError> {
    let resolved = store
        .resolved(section)
        .ok_or_else(|| InifigError::SectionNotFound(section.into()))?;
    Ok(ConfigResult::Listing {
        section: section.into(),
        entries: resolved.into_iter().collect(),
    })
}

/// Look up one key, falling back to DEFAULT.
pub fn get_value(store: &ConfigStore, section: &str, key: &str) -> Result<ConfigResult, InifigError> {
    if store.section(section).is_none() {
        return Err(InifigError::SectionNotFound(section.into()));
    }
    let value = store
        .get(section, key)
        .ok_or_else(|| InifigError::KeyNotFound {
            section: section.into(),
            key: key.into(),
        })?;
    Ok(ConfigResult::KeyValue {
        section: section.into(),
        key: key.into(),
        value: value.into(),
    })
}

/// Set a key, creating the section if needed.
///
/// Names that would not read back from the file are refused. The reported
/// value is the stored one, in the form the file will hold.
pub fn set_value(
    store: &mut ConfigStore,
    section: &str,
    key: &str,
    value: &str,
) -> Result<ConfigResult, InifigError> {
    store
        .try_set(section, key, value)
        .map_err(|source| InifigError::InvalidName {
            name: format!("{section}.{key}"),
            source,
        })?;
    let stored = store.get(section, key).unwrap_or_default();
    Ok(ConfigResult::ValueSet {
        section: section.into(),
        key: key.into(),
        value: stored.into(),
    })
}

/// Remove a key the section defines itself. Inherited DEFAULT values cannot
/// be unset from a named section.
pub fn unset_value(
    store: &mut ConfigStore,
    section: &str,
    key: &str,
) -> Result<ConfigResult, InifigError> {
    if section != DEFAULT_SECTION && !store.has_section(section) {
        return Err(InifigError::SectionNotFound(section.into()));
    }
    store
        .remove(section, key)
        .ok_or_else(|| InifigError::KeyNotFound {
            section: section.into(),
            key: key.into(),
        })?;
    Ok(ConfigResult::ValueUnset {
        section: section.into(),
        key: key.into(),
    })
}
