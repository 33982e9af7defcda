//! Template variables and `{name}` placeholder substitution.
//!
//! A template is an ordinary INI document whose values may contain
//! `{name}` tokens. Substitution is a single left-to-right pass:
//!
//! - `{name}` with `name` bound in [`Variables`] is replaced by its value.
//! - `{name}` with `name` unbound is left verbatim.
//! - Substituted text is never rescanned, so a value containing `{other}` is
//!   inserted as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::InifigError;
use crate::store::{ConfigStore, normalize_value};

/// Named substitution values for a single sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(BTreeMap<String, String>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Collect `{PREFIX}__NAME` environment variables of the current process.
    /// Names are lowercased, so `MYAPP__PROJECT_ROOT_PATH` binds
    /// `project_root_path`.
    pub fn from_env(prefix: &str) -> Self {
        crate::env::env_to_variables(prefix, std::env::vars())
    }

    /// Parse a flat TOML table of scalars into variables.
    ///
    /// Strings are taken as-is; integers, floats, booleans and datetimes use
    /// their TOML spelling. Tables and arrays are rejected.
    pub fn from_toml_str(content: &str) -> Result<Self, InifigError> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| InifigError::InvalidVariables(e.to_string()))?;

        let mut vars = Variables::new();
        for (name, value) in table {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Datetime(dt) => dt.to_string(),
                toml::Value::Array(_) | toml::Value::Table(_) => {
                    return Err(InifigError::InvalidVariables(format!(
                        "'{name}' is not a scalar value"
                    )));
                }
            };
            vars.insert(name, text);
        }
        Ok(vars)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        vars.extend(iter);
        vars
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Variables {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// Replace bound `{name}` placeholders in `value`.
pub fn substitute(value: &str, vars: &Variables) -> String {
    substitute_counted(value, vars).0
}

/// Like [`substitute`], also returning how many placeholders were replaced.
fn substitute_counted(value: &str, vars: &Variables) -> (String, usize) {
    let mut out = String::with_capacity(value.len());
    let mut count = 0;
    let mut rest = value;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push('{');
            rest = after;
            break;
        };
        match vars.get(&after[..close]) {
            Some(replacement) => {
                out.push_str(replacement);
                count += 1;
                rest = &after[close + 1..];
            }
            None => {
                // Keep the brace and rescan after it, so `{{name}` still
                // resolves the inner token.
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    (out, count)
}

/// Substitute variables into every value of `store`, DEFAULT included.
/// Returns the total number of replacements.
pub fn apply(store: &mut ConfigStore, vars: &Variables) -> usize {
    if vars.is_empty() {
        return 0;
    }
    let mut total = 0;
    for value in store.values_mut() {
        if !value.contains('{') {
            continue;
        }
        let (replaced, count) = substitute_counted(value, vars);
        if count > 0 {
            *value = normalize_value(&replaced);
            total += count;
        }
    }
    total
}
