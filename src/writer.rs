use tracing::info;

use crate::error::InifigError;
use crate::file;
use crate::handler::ConfigHandler;
use crate::store::ConfigStore;
use crate::validate::PathValidator;

/// Persists a [`ConfigStore`] to a handler's config path.
///
/// Shares every check, the plain read and template rendering with
/// [`Reader`](crate::Reader) through [`PathValidator`].
#[derive(Debug, Clone, Copy)]
pub struct Writer<'a> {
    handler: &'a ConfigHandler,
}

impl<'a> Writer<'a> {
    pub fn new(handler: &'a ConfigHandler) -> Self {
        Self { handler }
    }

    /// Serialize `store` and atomically replace the config file with it.
    ///
    /// Only the config path must be set: the file is created if missing,
    /// along with its parent directories. The template is not consulted.
    pub fn write(&self, store: &ConfigStore) -> Result<(), InifigError> {
        let path = self
            .handler
            .config_path()
            .ok_or(InifigError::PathNotSet)?;
        file::write_atomic(path, &store.to_string())?;
        info!(
            path = %path.display(),
            sections = store.section_count(),
            "config written"
        );
        Ok(())
    }
}

impl PathValidator for Writer<'_> {
    fn handler(&self) -> &ConfigHandler {
        self.handler
    }
}
