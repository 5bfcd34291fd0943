//! # Reconcile Command Implementation
//!
//! This module implements the `reconcile` subcommand, which diffs a scan
//! result against the approved-record catalog and reports what is new,
//! changed, or conflicting.
//!
//! ## Functionality
//!
//! - **Changeset computation**: Candidates are compared by identity against
//!   the catalog on the tracked fields only (source URL, description).
//! - **Conflict surfacing**: Same-name candidates that disagree on their
//!   source URL are listed for human disambiguation.
//! - **Exit codes**: Returns 0 when nothing needs review, 1 when the
//!   changeset is non-empty, so the command slots into CI pipelines the way
//!   a `diff` does.
//!
//! This command is a safe, read-only operation: the changeset is a proposal
//! and the catalog is never modified.

use anyhow::Result;
use clap::Args;
use std::fs;
use std::path::PathBuf;

use registry_sync::catalog;
use registry_sync::model::ScanResult;
use registry_sync::output::{emoji, OutputConfig};
use registry_sync::reconcile::reconcile;
use registry_sync::suggestions;

/// Diff a scan result against the approved catalog
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Path to the .registry-sync.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = ".registry-sync.yaml",
        env = "REGISTRY_SYNC_CONFIG"
    )]
    pub config: PathBuf,

    /// Path to a scan result JSON produced by `registry-sync scan`.
    #[arg(short, long, value_name = "FILE")]
    pub scan: PathBuf,

    /// The catalog root directory (overrides configuration).
    #[arg(long, value_name = "DIR")]
    pub catalog: Option<PathBuf>,

    /// Write the changeset JSON to this file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Show only a summary without listing individual entries.
    #[arg(long)]
    pub summary: bool,
}

/// Execute the `reconcile` command.
///
/// Returns `Ok(())` with exit code 0 when nothing needs review; signals exit
/// code 1 through the `CHANGES_DETECTED` sentinel when the changeset is
/// non-empty.
pub fn execute(args: ReconcileArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config = super::load_config(&args.config)?;
    let catalog_dir = args.catalog.unwrap_or(config.catalog.dir);

    if !args.scan.exists() {
        return Err(suggestions::scan_result_not_found(&args.scan));
    }
    let scan_result: ScanResult = serde_json::from_str(&fs::read_to_string(&args.scan)?)
        .map_err(|e| {
            anyhow::anyhow!("Failed to parse scan result {}: {}", args.scan.display(), e)
        })?;

    if !catalog_dir.is_dir() {
        return Err(suggestions::catalog_not_found(&catalog_dir));
    }
    let approved: Vec<_> = catalog::load(&catalog_dir)?
        .into_iter()
        .map(|loaded| loaded.record)
        .collect();

    let changeset = reconcile(&scan_result.entries, &approved);

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&changeset)?;
        fs::write(path, format!("{json}\n"))?;
        println!(
            "{} Wrote changeset to {}",
            emoji(&out, "✅", "[OK]"),
            path.display()
        );
    }

    if changeset.is_empty() {
        println!(
            "{} No changes detected ({} unchanged)",
            emoji(&out, "✅", "[OK]"),
            changeset.unchanged.len()
        );
        return Ok(());
    }

    if args.summary {
        println!("Changes detected:");
        if !changeset.new.is_empty() {
            println!("  {} new entr(y/ies)", changeset.new.len());
        }
        if !changeset.changed.is_empty() {
            println!("  {} changed entr(y/ies)", changeset.changed.len());
        }
        if !changeset.conflicts.is_empty() {
            println!("  {} conflict(s)", changeset.conflicts.len());
        }
    } else {
        if !changeset.new.is_empty() {
            println!("New entries (no approved record):");
            for entry in &changeset.new {
                println!("  + {} ({})", entry.identity, entry.source_url);
            }
            println!();
        }

        if !changeset.changed.is_empty() {
            println!("Changed entries (re-review required):");
            for changed in &changeset.changed {
                println!("  ~ {}", changed.identity);
                for diff in &changed.differences {
                    println!(
                        "      {}: '{}' -> '{}'",
                        diff.field, diff.approved, diff.candidate
                    );
                }
            }
            println!();
        }

        if !changeset.conflicts.is_empty() {
            println!("Conflicts (one name, several source URLs):");
            for conflict in &changeset.conflicts {
                println!("  ! {}", conflict.identity);
                for url in &conflict.source_urls {
                    println!("      {url}");
                }
            }
            println!();
        }
    }

    println!(
        "Summary: {} new, {} changed, {} unchanged, {} conflict(s)",
        changeset.new.len(),
        changeset.changed.len(),
        changeset.unchanged.len(),
        changeset.conflicts.len()
    );

    // Exit code 1 signals a non-empty changeset; main() recognizes this
    // sentinel and suppresses the error message.
    Err(anyhow::anyhow!("CHANGES_DETECTED"))
}
