//! # inifig demo application
//!
//! A sample CLI tool that wires [inifig](https://docs.rs/inifig) into a clap
//! parser. It exists to demonstrate and manually verify the library.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example inifig_demo -- --config demos/inifig_demo/app.ini config template-path
//! cargo run --example inifig_demo -- --config demos/inifig_demo/app.ini config sync --var project_root_path=/srv/app
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature               | How to exercise it                                                      |
//! |-----------------------|-------------------------------------------------------------------------|
//! | Dry-run sync          | `... config sync --var project_root_path=/srv --dry-run`                |
//! | Sync to disk          | `... config sync --var project_root_path=/srv`                          |
//! | Env var bindings      | `INIFIG_DEMO__PROJECT_ROOT_PATH=/srv ... config sync`                   |
//! | Variables file        | `... --vars vars.toml config sync`                                      |
//! | `config show`         | `... config show` or `... config show --json`                           |
//! | `config list`         | `... config list app1`                                                  |
//! | `config get`          | `... config get app2 send_email` (inherited from DEFAULT)               |
//! | `config set`/`unset`  | `... config set app2 line_height 14`, `... config unset app2 line_height` |
//! | Logging               | `RUST_LOG=debug ...`                                                    |
//!
//! Without `--config`, the demo uses `inifig-demo.ini` in the current directory.
//!
//! Variable precedence for `sync`, lowest first: `--vars` file, then
//! `INIFIG_DEMO__*` environment variables, then `--var` flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use inifig::{ConfigAction, ConfigArgs, ConfigHandler, ConfigLocation, InifigError, Variables};

const ENV_PREFIX: &str = "INIFIG_DEMO";

/// inifig demo, a sample CLI app for showcasing templated INI configs.
#[derive(Parser, Debug)]
#[command(name = "inifig-demo")]
struct Cli {
    /// Config file to manage. Its template is `<config>.template`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// TOML file of template variables.
    #[arg(long, global = true)]
    vars: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the config file (sync, show, list, get, set, unset, template-path).
    Config(ConfigArgs),
}

fn make_handler(cli: &Cli) -> Result<ConfigHandler, InifigError> {
    match &cli.config {
        Some(path) => Ok(ConfigHandler::new(path)),
        None => ConfigHandler::locate(&ConfigLocation::Cwd, "inifig-demo", "inifig-demo.ini"),
    }
}

/// Layer the variables file and environment under the `--var` flags.
fn layered_variables(vars_file: Option<&PathBuf>, flags: Variables) -> Result<Variables, InifigError> {
    let mut variables = match vars_file {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|source| InifigError::ReadError {
                path: path.clone(),
                source,
            })?;
            Variables::from_toml_str(&content)?
        }
        None => Variables::new(),
    };
    variables.extend(Variables::from_env(ENV_PREFIX).iter());
    variables.extend(flags.iter());
    Ok(variables)
}

fn run(cli: Cli) -> Result<(), InifigError> {
    let handler = make_handler(&cli)?;
    let Commands::Config(args) = cli.command;

    let action = match args.into_action() {
        ConfigAction::Sync { variables, dry_run } => ConfigAction::Sync {
            variables: layered_variables(cli.vars.as_ref(), variables)?,
            dry_run,
        },
        other => other,
    };
    handler.handle_and_print(&action)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).unwrap_or_else(|e| {
        eprintln!("Config error:\n{e}");
        std::process::exit(1);
    });
}
