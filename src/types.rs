use std::path::PathBuf;

use crate::template::Variables;

/// Where a config file lives.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigLocation {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Regenerate the config from its template. `dry_run` renders without writing.
    Sync { variables: Variables, dry_run: bool },
    /// Print the config file, as INI or JSON.
    Show { json: bool },
    /// Resolved entries of one section, DEFAULT inheritance applied.
    List { section: String },
    Get { section: String, key: String },
    Set {
        section: String,
        key: String,
        value: String,
    },
    Unset { section: String, key: String },
    /// Print where the template for this config is expected.
    TemplatePath,
}
