//! Program Functions CLI
//!
//! Generates the TypeScript lambda functions of a connector from its program
//! artifact files, and upgrades the connector scaffold.
//!
//! Usage:
//!   ndc-promptql-programs update [--allow-relaxed-types] [--default-readonly false]
//!   ndc-promptql-programs upgrade-configuration
//!   ndc-promptql-programs --help

use std::path::PathBuf;

use anyhow::Context;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use programs_codegen::logging::LogSettings;
use programs_codegen::{run_update, upgrade_scaffold, FunctionOptions, GeneratorConfig};
use tracing::error;

#[derive(Parser)]
#[command(name = "ndc-promptql-programs")]
#[command(version)]
#[command(about = "Create TS Lambda functions from program (automation) artifact files")]
struct Cli {
    /// Generator settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Connector project directory (overrides the configured root)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate/Update the TS Lambda functions from program artifact files
    Update {
        /// Tag every function with @allowrelaxedtypes
        #[arg(
            long,
            env = "ALLOW_RELAXED_TYPES",
            action = ArgAction::SetTrue,
            value_parser = BoolishValueParser::new()
        )]
        allow_relaxed_types: bool,

        /// Readonly flag for programs without an explicit override
        #[arg(
            long,
            env = "DEFAULT_READONLY",
            default_value_t = true,
            action = ArgAction::Set,
            value_parser = BoolishValueParser::new()
        )]
        default_readonly: bool,
    },

    /// Upgrade the connector configuration to the current version
    UpgradeConfiguration,
}

fn main() {
    if let Err(e) = LogSettings::from_env().init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!(error = %format!("{:#}", e), "Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::load_from(cli.config.as_deref())
        .context("Failed to load generator settings")?;
    if let Some(root) = cli.root {
        config.root = root;
    }

    match cli.command {
        Command::Update {
            allow_relaxed_types,
            default_readonly,
        } => {
            let options = FunctionOptions {
                allow_relaxed_types,
                readonly_default: default_readonly,
            };
            run_update(&config, options).context("Failed to generate program functions")?;
        }
        Command::UpgradeConfiguration => {
            upgrade_scaffold(&config.root).context("Failed to upgrade connector configuration")?;
        }
    }

    Ok(())
}
