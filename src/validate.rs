//! Path checks and loading shared by [`Reader`](crate::Reader) and
//! [`Writer`](crate::Writer).
//!
//! Both roles implement [`PathValidator`] by pointing it at their
//! [`ConfigHandler`]; every other method, including template rendering, is
//! provided here once. Paths are
//! derived from the handler on each call and never cached, so a role always
//! sees the handler's current identity.
//!
//! The checks are two-tier:
//!
//! 1. No config path set: [`InifigError::PathNotSet`]. The template path
//!    derives from the config path, so it is unset in exactly the same case.
//! 2. Path set but nothing on disk: [`InifigError::ConfigNotFound`] or
//!    [`InifigError::TemplateNotFound`], naming the path.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::InifigError;
use crate::file;
use crate::handler::ConfigHandler;
use crate::store::ConfigStore;
use crate::template::{self, Variables};

pub trait PathValidator {
    /// The handler whose identity this role reads.
    fn handler(&self) -> &ConfigHandler;

    /// Whether the config path is set and something exists there. Never fails.
    fn config_path_exists(&self) -> bool {
        self.handler().config_path().is_some_and(Path::exists)
    }

    /// `<config_path>.template`, or `None` while the config path is unset.
    fn template_path(&self) -> Option<PathBuf> {
        self.handler().template_path()
    }

    /// Require a set, existing config path and return it.
    fn check_config_path(&self) -> Result<&Path, InifigError> {
        let path = self.handler().config_path().ok_or(InifigError::PathNotSet)?;
        if !path.exists() {
            return Err(InifigError::ConfigNotFound(path.to_path_buf()));
        }
        debug!(path = %path.display(), "config path ok");
        Ok(path)
    }

    /// Require a set, existing template path and return it.
    fn check_template_path(&self) -> Result<PathBuf, InifigError> {
        let path = self.template_path().ok_or(InifigError::PathNotSet)?;
        if !path.exists() {
            return Err(InifigError::TemplateNotFound(path));
        }
        debug!(path = %path.display(), "template path ok");
        Ok(path)
    }

    /// Load the config file as-is, without substitution.
    fn read_config_file(&self) -> Result<ConfigStore, InifigError> {
        let path = self.check_config_path()?;
        file::load_store(path)
    }

    /// Load `<config_path>.template` and substitute `variables` into it.
    ///
    /// Requires a set config path and an existing template; the config file
    /// itself may be missing. The result is not written anywhere.
    fn read_template_file(&self, variables: &Variables) -> Result<ConfigStore, InifigError> {
        let path = self.check_template_path()?;
        let mut store = file::load_store(&path)?;
        let replaced = template::apply(&mut store, variables);
        debug!(
            template = %path.display(),
            variables = variables.len(),
            replaced,
            "template rendered"
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Workspace, project_vars};
    use crate::{Reader, Writer};

    #[test]
    fn exists_false_when_unset() {
        let handler = ConfigHandler::unset();
        assert!(!Reader::new(&handler).config_path_exists());
        assert!(!Writer::new(&handler).config_path_exists());
    }

    #[test]
    fn exists_true_for_present_file() {
        let ws = Workspace::new();
        let handler = ws.test_config();
        assert!(Reader::new(&handler).config_path_exists());
        assert!(Writer::new(&handler).config_path_exists());
    }

    #[test]
    fn exists_false_for_missing_file() {
        let ws = Workspace::new();
        let handler = ws.config();
        assert!(!Reader::new(&handler).config_path_exists());
    }

    #[test]
    fn template_path_appends_suffix() {
        let ws = Workspace::new();
        let handler = ws.test_config();
        let expected = ws.path("test_config.ini.template");
        assert_eq!(Reader::new(&handler).template_path(), Some(expected.clone()));
        assert_eq!(Writer::new(&handler).template_path(), Some(expected));
    }

    #[test]
    fn template_path_none_when_unset() {
        let handler = ConfigHandler::unset();
        assert_eq!(Reader::new(&handler).template_path(), None);
    }

    #[test]
    fn unset_path_fails_both_checks_with_path_not_set() {
        let handler = ConfigHandler::unset();
        for validator in [
            &Reader::new(&handler) as &dyn PathValidator,
            &Writer::new(&handler),
        ] {
            let err = validator.check_config_path().unwrap_err();
            assert!(matches!(err, InifigError::PathNotSet));
            assert_eq!(err.to_string(), "Config path not set");

            let err = validator.check_template_path().unwrap_err();
            assert!(matches!(err, InifigError::PathNotSet));
            assert_eq!(err.to_string(), "Config path not set");
        }
    }

    #[test]
    fn existing_paths_pass_checks() {
        let ws = Workspace::new();
        let handler = ws.test_config();
        let reader = Reader::new(&handler);
        let writer = Writer::new(&handler);

        assert_eq!(reader.check_config_path().unwrap(), ws.path("test_config.ini"));
        assert!(writer.check_config_path().is_ok());
        assert!(reader.check_template_path().is_ok());
        assert!(writer.check_template_path().is_ok());
    }

    #[test]
    fn missing_config_names_the_path() {
        let handler = ConfigHandler::new("./config.ini");
        for validator in [
            &Reader::new(&handler) as &dyn PathValidator,
            &Writer::new(&handler),
        ] {
            let err = validator.check_config_path().unwrap_err();
            assert!(matches!(err, InifigError::ConfigNotFound(_)));
            assert_eq!(err.to_string(), "Config file doesn't exist: ./config.ini");
        }
    }

    #[test]
    fn missing_template_names_the_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let handler = ConfigHandler::new(dir.path().join("app.ini"));
        let err = Writer::new(&handler).check_template_path().unwrap_err();
        let expected = format!(
            "Template file doesn't exist: {}",
            dir.path().join("app.ini.template").display()
        );
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn checks_follow_identity_changes() {
        let ws = Workspace::new();
        let mut handler = ConfigHandler::unset();
        assert!(Reader::new(&handler).check_config_path().is_err());

        handler.set_config_path(ws.path("test_config.ini"));
        assert!(Reader::new(&handler).check_config_path().is_ok());
    }

    #[test]
    fn read_config_file_reads_plain_values() {
        let ws = Workspace::new();
        let handler = ws.test_config();

        for validator in [
            &Reader::new(&handler) as &dyn PathValidator,
            &Writer::new(&handler),
        ] {
            let store = validator.read_config_file().unwrap();
            assert_eq!(store.get("app1", "send_email"), Some("false"));
            assert_eq!(store.get("app2", "send_email"), Some("true"));
            assert_eq!(store.get("app2", "front_page_title"), Some("Hello World!"));
        }
    }

    #[test]
    fn read_config_file_requires_path() {
        let handler = ConfigHandler::unset();
        let result = Reader::new(&handler).read_config_file();
        assert!(matches!(result, Err(InifigError::PathNotSet)));
    }

    #[test]
    fn both_roles_render_the_same_template() {
        let ws = Workspace::new();
        let handler = ws.config();
        let from_reader = Reader::new(&handler)
            .read_template_file(&project_vars())
            .unwrap();
        let from_writer = Writer::new(&handler)
            .read_template_file(&project_vars())
            .unwrap();
        assert_eq!(from_reader, from_writer);
    }
}
