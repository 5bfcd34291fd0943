//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks every
//! approved record in the catalog against the structural rules enforced at
//! the catalog boundary.
//!
//! ## Functionality
//!
//! - **Record Validation**: Required fields present, identity equals the
//!   storage key, category equals the storage partition, URL and date syntax.
//! - **Per-file Reporting**: Every issue names the file, the field, and the
//!   expected vs actual value, so a human can fix the whole catalog in one
//!   pass.
//! - **Layout Warnings**: Missing partition directories and an entirely
//!   empty catalog are warnings; `--strict` turns warnings into failures.
//!
//! This command is a safe, read-only operation that does not modify any
//! files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use registry_sync::catalog;
use registry_sync::model::Category;
use registry_sync::output::{emoji, OutputConfig};
use registry_sync::suggestions;

/// Validate the approved-record catalog
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the .registry-sync.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = ".registry-sync.yaml",
        env = "REGISTRY_SYNC_CONFIG"
    )]
    pub config: PathBuf,

    /// The catalog root directory (overrides configuration).
    #[arg(long, value_name = "DIR")]
    pub catalog: Option<PathBuf>,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never",
///   or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config = super::load_config(&args.config)?;
    let catalog_dir = args.catalog.unwrap_or(config.catalog.dir);

    println!(
        "{} Validating catalog: {}",
        emoji(&out, "🔍", "[SCAN]"),
        catalog_dir.display()
    );

    if !catalog_dir.is_dir() {
        return Err(suggestions::catalog_not_found(&catalog_dir));
    }

    let mut has_warnings = false;
    for category in Category::ALL {
        let partition = catalog_dir.join(category.partition());
        if !partition.is_dir() {
            println!(
                "{} Missing partition directory: {}",
                emoji(&out, "⚠️", "[WARN]"),
                partition.display()
            );
            has_warnings = true;
        }
    }

    let report = catalog::validate(&catalog_dir)?;

    println!("\n{} Catalog Summary:", emoji(&out, "📊", "[INFO]"));
    println!("   Records checked: {}", report.files_checked);
    println!("   Issues found: {}", report.issues.len());

    if report.files_checked == 0 {
        println!(
            "{} Catalog contains no records",
            emoji(&out, "⚠️", "[WARN]")
        );
        has_warnings = true;
    }

    if !report.issues.is_empty() {
        println!();
        for issue in &report.issues {
            println!("{} {}", emoji(&out, "❌", "[ERR]"), issue);
        }
    }

    println!("\n{} Validation Result:", emoji(&out, "🎯", "[RESULT]"));

    if !report.is_clean() {
        println!(
            "{} Catalog has errors that must be fixed",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!("Catalog validation failed"));
    }

    if has_warnings && args.strict {
        println!(
            "{} Catalog has warnings (strict mode enabled)",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!("Catalog validation failed in strict mode"));
    }

    if has_warnings {
        println!("{} Catalog is valid but has warnings", emoji(&out, "⚠️", "[WARN]"));
    } else {
        println!("{} Catalog is valid", emoji(&out, "✅", "[OK]"));
    }

    Ok(())
}
