use std::path::PathBuf;
use thiserror::Error;

use crate::store::{NameError, ParseError};

/// Broad category of an [`InifigError`], for callers that branch on the
/// failure class rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An operation needed the config path but none was set.
    PathNotSet,
    /// The path is set but nothing exists there.
    FileNotFound,
    /// File contents are not valid INI.
    Parse,
    /// The file system refused a read.
    Read,
    /// The file system refused a write.
    Write,
    /// A section or key lookup missed.
    Lookup,
    /// A variables source could not be turned into a variable map.
    Variables,
    /// A config location could not be resolved to a directory.
    Location,
    /// A store could not be rendered to an output format.
    Render,
    /// A section or key name cannot be represented in INI.
    InvalidName,
}

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum InifigError {
    #[error("Config path not set")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(inifig::path_not_set),
            help("construct the handler with ConfigHandler::new(path) or call set_config_path()")
        )
    )]
    PathNotSet,

    #[error("Config file doesn't exist: {}", .0.display())]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(inifig::config_not_found),
            help("run a sync to generate the config file from its template")
        )
    )]
    ConfigNotFound(PathBuf),

    #[error("Template file doesn't exist: {}", .0.display())]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(inifig::template_not_found),
            help("the template lives next to the config file, with a .template suffix")
        )
    )]
    TemplateNotFound(PathBuf),

    #[error("Failed to parse {}: {source}", .path.display())]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(inifig::parse)))]
    ParseError { path: PathBuf, source: ParseError },

    #[error("Failed to read {}: {source}", .path.display())]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(inifig::read)))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(inifig::write)))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Section not found: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(inifig::section_not_found)))]
    SectionNotFound(String),

    #[error("Key not found: {section}.{key}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(inifig::key_not_found)))]
    KeyNotFound { section: String, key: String },

    #[error("Invalid name '{name}': {source}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(inifig::invalid_name),
            help("keys must not contain '=', ':' or line breaks, nor start with '#', ';' or '['")
        )
    )]
    InvalidName { name: String, source: NameError },

    #[error("Invalid variables: {0}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(inifig::invalid_variables),
            help("variables must be a flat table of strings, numbers or booleans")
        )
    )]
    InvalidVariables(String),

    #[error("Could not resolve config location: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(inifig::location)))]
    LocationUnavailable(String),

    #[error("Failed to render config as JSON: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(inifig::render)))]
    RenderError(#[from] serde_json::Error),
}

impl InifigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InifigError::PathNotSet => ErrorKind::PathNotSet,
            InifigError::ConfigNotFound(_) | InifigError::TemplateNotFound(_) => {
                ErrorKind::FileNotFound
            }
            InifigError::ParseError { .. } => ErrorKind::Parse,
            InifigError::ReadError { .. } => ErrorKind::Read,
            InifigError::WriteError { .. } => ErrorKind::Write,
            InifigError::SectionNotFound(_) | InifigError::KeyNotFound { .. } => {
                ErrorKind::Lookup
            }
            InifigError::InvalidName { .. } => ErrorKind::InvalidName,
            InifigError::InvalidVariables(_) => ErrorKind::Variables,
            InifigError::LocationUnavailable(_) => ErrorKind::Location,
            InifigError::RenderError(_) => ErrorKind::Render,
        }
    }
}
