//! Clap adapter for inifig.
//!
//! Compiled only with the `clap` Cargo feature (on by default). Embed
//! [`ConfigArgs`] in your own `#[derive(Parser)]` tree to get
//! `config sync|show|list|get|set|unset|template-path` subcommands.
//!
//! [`ConfigArgs::into_action()`] is the only bridge to the core: it yields a
//! [`ConfigAction`] that [`ConfigHandler::handle()`](crate::ConfigHandler::handle)
//! executes. Callers using another parser build [`ConfigAction`] directly.

use clap::{Args, Subcommand};

use crate::template::Variables;
use crate::types::ConfigAction;

/// Clap-derived args for the `config` subcommand group.
///
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Regenerate the config file from its template.
    Sync {
        /// Template variable binding, repeatable.
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
        vars: Vec<(String, String)>,
        /// Print the rendered config instead of writing it.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the config file.
    Show {
        /// Print as JSON instead of INI.
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved keys of a section, DEFAULT values included.
    List { section: String },
    /// Show the resolved value of a key.
    Get { section: String, key: String },
    /// Persist a value to the config file.
    Set {
        section: String,
        key: String,
        value: String,
    },
    /// Remove a value from the config file.
    Unset { section: String, key: String },
    /// Print where the template is expected.
    TemplatePath,
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `config` (no subcommand) maps to `ConfigAction::Show`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None => ConfigAction::Show { json: false },
            Some(ConfigSubcommand::Sync { vars, dry_run }) => ConfigAction::Sync {
                variables: vars.into_iter().collect::<Variables>(),
                dry_run,
            },
            Some(ConfigSubcommand::Show { json }) => ConfigAction::Show { json },
            Some(ConfigSubcommand::List { section }) => ConfigAction::List { section },
            Some(ConfigSubcommand::Get { section, key }) => ConfigAction::Get { section, key },
            Some(ConfigSubcommand::Set {
                section,
                key,
                value,
            }) => ConfigAction::Set {
                section,
                key,
                value,
            },
            Some(ConfigSubcommand::Unset { section, key }) => ConfigAction::Unset { section, key },
            Some(ConfigSubcommand::TemplatePath) => ConfigAction::TemplatePath,
        }
    }
}

/// Parse `NAME=VALUE`. The value may be empty or contain `=`; the name may not be empty.
fn parse_var(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}
