use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::InifigError;
use crate::file;
use crate::ops::{self, ConfigResult};
use crate::reader::Reader;
use crate::store::ConfigStore;
use crate::template::Variables;
use crate::types::{ConfigAction, ConfigLocation};
use crate::validate::PathValidator;
use crate::writer::Writer;

/// Suffix appended to the config path to find its template.
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Identity of one config file: its path and, derived from it, the path of
/// its template.
///
/// An unset path is a valid state. Operations that need the path fail with
/// [`InifigError::PathNotSet`] when they run, not when the handler is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigHandler {
    config_path: Option<PathBuf>,
}

impl ConfigHandler {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(config_path.into()),
        }
    }

    /// A handler with no config path yet.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Place `file_name` in the directory a [`ConfigLocation`] resolves to.
    pub fn locate(
        location: &ConfigLocation,
        app_name: &str,
        file_name: &str,
    ) -> Result<Self, InifigError> {
        let dir = file::resolve_location(location, app_name)
            .ok_or_else(|| InifigError::LocationUnavailable(format!("{location:?}")))?;
        Ok(Self::new(dir.join(file_name)))
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn set_config_path(&mut self, path: impl Into<PathBuf>) {
        self.config_path = Some(path.into());
    }

    pub fn clear_config_path(&mut self) {
        self.config_path = None;
    }

    /// `<config_path>.template`, or `None` while the config path is unset.
    pub fn template_path(&self) -> Option<PathBuf> {
        let mut path = OsString::from(self.config_path.as_ref()?);
        path.push(TEMPLATE_SUFFIX);
        Some(PathBuf::from(path))
    }

    pub fn reader(&self) -> Reader<'_> {
        Reader::new(self)
    }

    pub fn writer(&self) -> Writer<'_> {
        Writer::new(self)
    }

    /// Render the template with `variables` and write the result to the
    /// config path, creating the file if needed.
    ///
    /// Fails if the config path is unset or the template is missing; nothing
    /// is written then. Use [`Reader`]'s `read_template_file` to render
    /// without writing.
    pub fn sync(&self, variables: &Variables) -> Result<Synced<'_>, InifigError> {
        let store = self.reader().read_template_file(variables)?;
        self.writer().write(&store)?;
        debug!(sections = store.section_count(), "config synced from template");
        Ok(Synced {
            handler: self,
            store,
        })
    }

    /// Handle a [`ConfigAction`] and print the result to stdout.
    pub fn handle_and_print(&self, action: &ConfigAction) -> Result<(), InifigError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a [`ConfigAction`] (sync / show / list / get / set / unset / template-path).
    pub fn handle(&self, action: &ConfigAction) -> Result<ConfigResult, InifigError> {
        match action {
            ConfigAction::Sync {
                variables,
                dry_run,
            } => {
                if *dry_run {
                    let store = self.reader().read_template_file(variables)?;
                    return Ok(ConfigResult::Rendered(store.to_string()));
                }
                let synced = self.sync(variables)?;
                let path = self
                    .config_path()
                    .ok_or(InifigError::PathNotSet)?
                    .to_path_buf();
                Ok(ConfigResult::Synced {
                    path,
                    sections: synced.read().section_count(),
                })
            }
            ConfigAction::Show { json } => {
                let store = self.reader().read_config_file()?;
                ops::render(&store, *json)
            }
            ConfigAction::List { section } => {
                let store = self.reader().read_config_file()?;
                ops::list_section(&store, section)
            }
            ConfigAction::Get { section, key } => {
                let store = self.reader().read_config_file()?;
                ops::get_value(&store, section, key)
            }
            ConfigAction::Set {
                section,
                key,
                value,
            } => {
                let mut store = self.load_or_empty()?;
                let result = ops::set_value(&mut store, section, key, value)?;
                self.writer().write(&store)?;
                Ok(result)
            }
            ConfigAction::Unset { section, key } => {
                let mut store = self.reader().read_config_file()?;
                let result = ops::unset_value(&mut store, section, key)?;
                self.writer().write(&store)?;
                Ok(result)
            }
            ConfigAction::TemplatePath => self
                .template_path()
                .map(ConfigResult::TemplatePath)
                .ok_or(InifigError::PathNotSet),
        }
    }

    /// The current config file, or an empty store if it does not exist yet.
    fn load_or_empty(&self) -> Result<ConfigStore, InifigError> {
        let reader = self.reader();
        if reader.config_path_exists() {
            reader.read_config_file()
        } else {
            Ok(ConfigStore::new())
        }
    }
}

impl From<Option<PathBuf>> for ConfigHandler {
    fn from(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }
}

/// A template rendered and written by [`ConfigHandler::sync`].
#[derive(Debug, Clone)]
pub struct Synced<'a> {
    handler: &'a ConfigHandler,
    store: ConfigStore,
}

impl Synced<'_> {
    /// The rendered store. No I/O.
    pub fn read(&self) -> &ConfigStore {
        &self.store
    }

    pub fn into_store(self) -> ConfigStore {
        self.store
    }

    /// Write the rendered store to the handler's config path again, e.g.
    /// after the file was changed or removed since the sync.
    ///
    /// Returns `self` so `sync(..)?.write()?.read()` chains.
    pub fn write(&self) -> Result<&Self, InifigError> {
        self.handler.writer().write(&self.store)?;
        Ok(self)
    }
}
