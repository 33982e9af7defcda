//! File I/O for config and template files, and config location discovery.
//!
//! # Loading
//!
//! [`load_store`] reads a file and parses it into a [`ConfigStore`]. I/O
//! failures become [`InifigError::ReadError`], malformed content becomes
//! [`InifigError::ParseError`]. Callers check existence first so a missing
//! file surfaces as a not-found error instead of a read error.
//!
//! # Writing
//!
//! [`write_atomic`] writes to a temporary file in the target directory and
//! renames it over the destination. Readers see either the old file or the
//! new one, never a partial write. A failed write leaves the destination
//! untouched and the temporary file is removed on drop.
//!
//! # Discovery
//!
//! [`resolve_location`] turns a [`ConfigLocation`] into a concrete directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::InifigError;
use crate::store::ConfigStore;
use crate::types::ConfigLocation;

/// Resolve a [`ConfigLocation`] to a directory.
///
/// `app_name` is used by [`ConfigLocation::Platform`] to build the
/// platform-specific config directory (e.g. `~/.config/{app_name}/` on Linux).
///
/// Returns `None` if the directory cannot be determined (e.g. no home directory).
pub fn resolve_location(location: &ConfigLocation, app_name: &str) -> Option<PathBuf> {
    match location {
        ConfigLocation::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        ConfigLocation::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        ConfigLocation::Cwd => std::env::current_dir().ok(),
        ConfigLocation::Path(p) => Some(p.clone()),
    }
}

/// Read and parse an INI file.
pub fn load_store(path: &Path) -> Result<ConfigStore, InifigError> {
    let content = std::fs::read_to_string(path).map_err(|e| InifigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "loaded ini file");

    ConfigStore::parse(&content).map_err(|e| InifigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Replace `path` with `content` via write-then-rename.
/// Creates parent directories if needed.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), InifigError> {
    let write_err = |source: std::io::Error| InifigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| InifigError::WriteError {
        path: parent.to_path_buf(),
        source: e,
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::TEST_CONFIG;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_resolves_verbatim() {
        let dir = PathBuf::from("/etc/myapp");
        let resolved = resolve_location(&ConfigLocation::Path(dir.clone()), "myapp");
        assert_eq!(resolved, Some(dir));
    }

    #[test]
    fn cwd_resolves_to_current_dir() {
        let resolved = resolve_location(&ConfigLocation::Cwd, "myapp");
        assert_eq!(resolved, std::env::current_dir().ok());
    }

    #[test]
    fn home_resolves_under_home_dir() {
        if let Some(resolved) = resolve_location(&ConfigLocation::Home(".myapp"), "myapp") {
            assert!(resolved.ends_with(".myapp"));
        }
    }

    #[test]
    fn platform_mentions_app_name() {
        if let Some(resolved) = resolve_location(&ConfigLocation::Platform, "myapp") {
            assert!(resolved.to_string_lossy().contains("myapp"));
        }
    }

    #[test]
    fn load_store_parses_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, TEST_CONFIG).unwrap();

        let store = load_store(&path).unwrap();
        assert_eq!(store.get("app1", "line_height"), Some("12"));
    }

    #[test]
    fn load_store_missing_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = load_store(&dir.path().join("nope.ini"));
        assert!(matches!(result, Err(InifigError::ReadError { .. })));
    }

    #[test]
    fn load_store_malformed_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.ini");
        fs::write(&path, "orphan = 1\n").unwrap();

        let err = load_store(&path).unwrap_err();
        assert!(matches!(err, InifigError::ParseError { .. }));
        assert!(err.to_string().contains("bad.ini"));
    }

    #[test]
    fn write_atomic_creates_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("dir").join("config.ini");

        write_atomic(&path, "[s]\nk = v\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[s]\nk = v\n");
    }

    #[test]
    fn write_atomic_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[old]\nk = 1\n").unwrap();

        write_atomic(&path, "[new]\nk = 2\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[new]\nk = 2\n");
    }

    #[test]
    fn write_atomic_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        write_atomic(&path, "[s]\n").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("config.ini")]);
    }

    #[test]
    fn write_atomic_into_directory_path_fails() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("taken");
        fs::create_dir(&target).unwrap();

        let result = write_atomic(&target, "[s]\n");
        assert!(matches!(result, Err(InifigError::WriteError { .. })));
        assert!(target.is_dir());
    }
}
