//! Templated INI configuration files. Keep a template next to your config,
//! render it with variables, read and edit the result.
//!
//! Every config file `config.ini` has an optional sibling
//! `config.ini.template`. The template is an ordinary INI document whose
//! values may contain `{name}` placeholders. Syncing renders the template
//! with a set of [`Variables`] and writes the result over the config file.
//!
//! ```ignore
//! let handler = ConfigHandler::new("/srv/app/config.ini");
//! let vars = Variables::new().with("project_root_path", "/srv/app");
//! let store = handler.sync(&vars)?.read().clone();
//! assert_eq!(store.get("app1", "input_path"), Some("/srv/app/input/app1"));
//! ```
//!
//! # Design: one identity, two roles
//!
//! A [`ConfigHandler`] owns exactly one thing, the config path. The template
//! path is derived from it on demand (`<config_path>.template`), so the two
//! can never drift apart. An unset path is a valid state; operations that
//! need it fail with [`InifigError::PathNotSet`] when they run.
//!
//! Two lightweight roles borrow the handler, [`Reader`] and [`Writer`].
//! Both implement [`PathValidator`], which provides the shared checks
//! (`config_path_exists`, `check_config_path`, `check_template_path`), the
//! plain [`read_config_file`](PathValidator::read_config_file) and the
//! substituting [`read_template_file`](PathValidator::read_template_file).
//! Only the writer adds a persistence step, [`Writer::write`].
//! The roles never cache paths, so changing the handler's path is seen by
//! the next call.
//!
//! # INI model
//!
//! [`ConfigStore`] is the in-memory document: named sections of string
//! key-value pairs plus the reserved `DEFAULT` section. Lookups in a named
//! section fall back to `DEFAULT`. Keys are case-insensitive, section names
//! are not. All values are strings; callers parse them as they see fit.
//!
//! Writing is deterministic: `DEFAULT` first, then sections in insertion
//! order, keys in insertion order. Writes are atomic, so a reader never sees
//! a half-written file.
//!
//! # Substitution
//!
//! `{name}` is replaced when `name` is bound and left verbatim otherwise.
//! Substitution is a single pass: replaced text is not scanned again. See
//! [`substitute`].
//!
//! Variables come from anywhere: built in code, parsed from a TOML table
//! with [`Variables::from_toml_str`], or collected from `PREFIX__NAME`
//! environment variables with [`Variables::from_env`].
//!
//! # Operations without a CLI
//!
//! The core has no dependency on any CLI framework. [`ConfigAction`]
//! describes sync / show / list / get / set / unset / template-path, and
//! [`ConfigHandler::handle`] runs it and returns a [`ConfigResult`] for
//! display.
//!
//! For [clap](https://docs.rs/clap) users, the `cli` module (behind the
//! `clap` feature, on by default) provides [`ConfigArgs`], a derive type to
//! embed in your own parser. Without clap:
//!
//! ```toml
//! inifig = { version = "...", default-features = false }
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events (`debug` for
//! reads and path checks, `info` for writes) and never installs a
//! subscriber. Applications choose their own.
//!
//! # Error handling
//!
//! All fallible operations return [`InifigError`]. Messages name the path
//! or key involved; [`InifigError::kind`] groups variants for callers that
//! only care about the failure class. With the `rich-errors` feature the
//! error also implements `miette::Diagnostic`.

pub mod error;
pub mod store;
pub mod template;
pub mod types;

#[cfg(feature = "clap")]
mod cli;
mod env;
mod file;
mod handler;
mod ops;
mod reader;
mod validate;
mod writer;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use error::{ErrorKind, InifigError};
pub use handler::{ConfigHandler, Synced, TEMPLATE_SUFFIX};
pub use ops::ConfigResult;
pub use reader::Reader;
pub use store::{ConfigStore, DEFAULT_SECTION, NameError, ParseError, Section};
pub use template::{Variables, substitute};
pub use types::{ConfigAction, ConfigLocation};
pub use validate::PathValidator;
pub use writer::Writer;
