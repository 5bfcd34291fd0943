//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Registry Sync - Scan a markdown server registry and reconcile it against
/// an approved catalog
#[derive(Parser, Debug)]
#[command(name = "registry-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan the registry document and emit candidate entries as JSON
    Scan(commands::scan::ScanArgs),

    /// Diff a scan result against the approved catalog
    Reconcile(commands::reconcile::ReconcileArgs),

    /// Validate the approved-record catalog
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.log_level),
        )
        .format_timestamp(None)
        .try_init()
        .ok();

        match self.command {
            Commands::Scan(args) => commands::scan::execute(args, &self.color),
            Commands::Reconcile(args) => commands::reconcile::execute(args, &self.color),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
