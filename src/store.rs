//! In-memory INI store: sections of string key-value pairs plus a reserved
//! `DEFAULT` section.
//!
//! # Grammar
//!
//! ```text
//! ; comment            # comment
//! [DEFAULT]
//! send_email = true
//!
//! [app1]
//! line_height: 12
//! description = first line
//!     second line
//! ```
//!
//! - `[name]` opens a section. Names are case-sensitive; `DEFAULT` is reserved.
//! - `key = value` or `key: value`; the first `=` or `:` splits the line.
//!   Keys are case-insensitive and stored lowercased. Both sides are trimmed.
//! - Lines starting with `#` or `;` are comments. Blank lines are ignored.
//! - An indented line directly after a key continues that key's value.
//!   Blank lines inside a continued value are kept; trailing ones are not.
//! - A repeated section merges into the first; a repeated key overwrites.
//!
//! # DEFAULT inheritance
//!
//! Any key missing from a named section falls back to the `DEFAULT` section.
//! [`ConfigStore::get`] and [`ConfigStore::resolved`] apply the fallback;
//! [`ConfigStore::section`] exposes only the section's own entries.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Name of the section whose keys every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Syntax errors, with 1-indexed line numbers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: key-value pair before any section header")]
    MissingSectionHeader { line: usize },

    #[error("line {line}: empty section name")]
    EmptySectionName { line: usize },

    #[error("line {line}: unterminated section header '{text}'")]
    UnterminatedHeader { line: usize, text: String },

    #[error("line {line}: expected 'key = value', found '{text}'")]
    InvalidLine { line: usize, text: String },

    #[error("line {line}: empty key")]
    EmptyKey { line: usize },
}

/// A key or section name that cannot be written as INI and read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("must not be empty")]
    Empty,
    #[error("must not contain '=', ':' or a line break")]
    ReservedChar,
    #[error("must not start with '#', ';' or '['")]
    ReservedPrefix,
    #[error("must not contain a line break")]
    LineBreak,
}

/// Keys are matched case-insensitively.
fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// The form a value takes after a write and a parse: each line trimmed,
/// leading and trailing blank lines dropped.
pub(crate) fn normalize_value(value: &str) -> String {
    let lines: Vec<&str> = value.lines().map(str::trim).collect();
    lines.join("\n").trim().to_string()
}

/// Check that `key` survives a write and a parse as the same key.
pub fn check_key(key: &str) -> Result<(), NameError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(NameError::Empty);
    }
    if key.contains(['=', ':', '\n', '\r']) {
        return Err(NameError::ReservedChar);
    }
    if key.starts_with(['#', ';', '[']) {
        return Err(NameError::ReservedPrefix);
    }
    Ok(())
}

/// Check that a section name survives a write and a parse unchanged.
pub fn check_section_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(['\n', '\r']) {
        return Err(NameError::LineBreak);
    }
    Ok(())
}

/// The own entries of one section, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or overwrite `key`, keeping its original position. Returns the
    /// previous value. The value is stored in its written form, see
    /// [`ConfigStore::try_set`].
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        let key = normalize_key(key);
        let value = normalize_value(&value.into());
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let key = normalize_key(key);
        let idx = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mutable access to every value, for in-place rewriting.
    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.entries.iter_mut().map(|(_, v)| v)
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A whole INI document in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    defaults: Section,
    sections: Vec<(String, Section)>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text. See the module docs for the accepted grammar.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut store = ConfigStore::new();
        // Section currently receiving keys, and the key a continuation line
        // would extend.
        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;
        // Blank lines seen since `last_key`; kept only if a continuation follows.
        let mut pending_blank = 0;

        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                if last_key.is_some() {
                    pending_blank += 1;
                }
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw.starts_with(|c: char| c.is_whitespace());
            if indented
                && let (Some(section), Some(key)) = (&current, &last_key)
            {
                let target = store.section_entry(section);
                let mut value = target.get(key).unwrap_or_default().to_string();
                value.push_str(&"\n".repeat(pending_blank + 1));
                value.push_str(trimmed);
                target.set(key, value);
                pending_blank = 0;
                continue;
            }
            pending_blank = 0;

            if trimmed.starts_with('[') {
                let Some(name) = trimmed
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                else {
                    return Err(ParseError::UnterminatedHeader {
                        line,
                        text: trimmed.to_string(),
                    });
                };
                let name = name.trim();
                if name.is_empty() {
                    return Err(ParseError::EmptySectionName { line });
                }
                store.section_entry(name);
                current = Some(name.to_string());
                last_key = None;
                continue;
            }

            let Some(section) = &current else {
                return Err(ParseError::MissingSectionHeader { line });
            };
            let Some(split) = trimmed.find(['=', ':']) else {
                return Err(ParseError::InvalidLine {
                    line,
                    text: trimmed.to_string(),
                });
            };
            let key = normalize_key(&trimmed[..split]);
            if key.is_empty() {
                return Err(ParseError::EmptyKey { line });
            }
            let value = trimmed[split + 1..].trim();
            store.section_entry(section).set(&key, value);
            last_key = Some(key);
        }

        Ok(store)
    }

    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// The own entries of `name` (no DEFAULT fallback). `"DEFAULT"` returns
    /// the default section.
    pub fn section(&self, name: &str) -> Option<&Section> {
        if name == DEFAULT_SECTION {
            return Some(&self.defaults);
        }
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Whether a named section exists. The default section is not counted.
    pub fn has_section(&self, name: &str) -> bool {
        name != DEFAULT_SECTION && self.section(name).is_some()
    }

    /// Named sections in document order, excluding `DEFAULT`.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(n, _)| n.as_str())
    }

    /// Get or create a section. As in [`ConfigStore::parse`], a name seen
    /// twice refers to the same section.
    pub fn add_section(&mut self, name: &str) -> &mut Section {
        self.section_entry(name)
    }

    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        if name == DEFAULT_SECTION {
            return Some(std::mem::take(&mut self.defaults));
        }
        let idx = self.sections.iter().position(|(n, _)| n == name)?;
        Some(self.sections.remove(idx).1)
    }

    /// Look up `key` in `section`, falling back to `DEFAULT`.
    ///
    /// Returns `None` if the section does not exist, even when DEFAULT holds
    /// the key.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let own = self.section(section)?;
        own.get(key).or_else(|| self.defaults.get(key))
    }

    /// Like [`ConfigStore::set`], but refuses a section name or key that
    /// would not read back as itself.
    ///
    /// Values are normalized rather than refused: each line is trimmed and
    /// surrounding blank lines are dropped, which is what a write and a parse
    /// would do anyway. The stored value is what [`ConfigStore::get`] and the
    /// file will show.
    pub fn try_set(
        &mut self,
        section: &str,
        key: &str,
        value: impl Into<String>,
    ) -> Result<Option<String>, NameError> {
        check_section_name(section)?;
        check_key(key)?;
        Ok(self.set(section, key, value))
    }

    /// Set `key` in `section`, creating the section if needed.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) -> Option<String> {
        self.section_entry(section).set(key, value)
    }

    /// Remove an own key from `section`. Inherited DEFAULT keys are not
    /// touched.
    pub fn remove(&mut self, section: &str, key: &str) -> Option<String> {
        if section == DEFAULT_SECTION {
            return self.defaults.remove(key);
        }
        self.sections
            .iter_mut()
            .find(|(n, _)| n == section)
            .and_then(|(_, s)| s.remove(key))
    }

    /// The effective view of a section: DEFAULT entries overlaid by the
    /// section's own entries.
    pub fn resolved(&self, section: &str) -> Option<BTreeMap<String, String>> {
        let own = self.section(section)?;
        let mut merged: BTreeMap<String, String> = self
            .defaults
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (key, value) in own.iter() {
            merged.insert(key.to_string(), value.to_string());
        }
        Some(merged)
    }

    /// Number of sections, counting DEFAULT when it has entries.
    pub fn section_count(&self) -> usize {
        self.sections.len() + usize::from(!self.defaults.is_empty())
    }

    /// Every value in the document, DEFAULT first.
    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.defaults
            .values_mut()
            .chain(self.sections.iter_mut().flat_map(|(_, s)| s.values_mut()))
    }

    fn section_entry(&mut self, name: &str) -> &mut Section {
        if name == DEFAULT_SECTION {
            return &mut self.defaults;
        }
        let idx = match self.sections.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.sections.push((name.to_string(), Section::new()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx].1
    }
}

impl FromStr for ConfigStore {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigStore::parse(s)
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, name: &str, section: &Section) -> fmt::Result {
    writeln!(f, "[{name}]")?;
    for (key, value) in section.iter() {
        writeln!(f, "{key} = {}", value.replace('\n', "\n\t"))?;
    }
    writeln!(f)
}

impl fmt::Display for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.defaults.is_empty() {
            write_section(f, DEFAULT_SECTION, &self.defaults)?;
        }
        for (name, section) in &self.sections {
            write_section(f, name, section)?;
        }
        Ok(())
    }
}

impl Serialize for ConfigStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.section_count()))?;
        if !self.defaults.is_empty() {
            map.serialize_entry(DEFAULT_SECTION, &self.defaults)?;
        }
        for (name, section) in &self.sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}
