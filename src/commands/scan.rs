//! # Scan Command Implementation
//!
//! This module implements the `scan` subcommand, which reads the registry
//! document (from a local file or over HTTP), extracts candidate entries,
//! and emits the scan result as JSON for downstream review tooling.
//!
//! ## Functionality
//!
//! - **Document acquisition**: By default the document is fetched from the
//!   configured registry URL under the configured retry policy; `--input`
//!   reads a local file instead, which is also how the end-to-end tests
//!   exercise the command without a network.
//! - **Category filtering**: `--category` restricts extraction to a subset
//!   of the recognized sections.
//! - **Zero-result policy**: a scan that matches nothing either fails or
//!   proceeds, per configuration; `--allow-empty` / `--fail-empty` override
//!   it for one invocation.
//! - **Enrichment**: `--enrich` decorates resolved entries with repository
//!   metadata, sequentially and best-effort.
//!
//! Human-readable progress goes to stderr when the JSON result goes to
//! stdout, so the output stays pipeable.

use anyhow::Result;
use clap::Args;
use indicatif::ProgressBar;
use std::fs;
use std::path::PathBuf;

use registry_sync::config::EmptyScanPolicy;
use registry_sync::enrich::Enricher;
use registry_sync::fetch;
use registry_sync::model::Category;
use registry_sync::output::{emoji, OutputConfig};
use registry_sync::scan::RegistryScanner;
use registry_sync::suggestions;

/// Scan the registry document and emit candidate entries as JSON
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the .registry-sync.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = ".registry-sync.yaml",
        env = "REGISTRY_SYNC_CONFIG"
    )]
    pub config: PathBuf,

    /// Read the registry document from a local file instead of fetching it.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Fetch the registry document from this URL (overrides configuration).
    #[arg(long, value_name = "URL", conflicts_with = "input")]
    pub url: Option<String>,

    /// Write the scan result JSON to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Restrict the scan to a category (official, community). Repeatable.
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<Category>,

    /// Fetch repository metadata for entries with a resolved repository.
    #[arg(long)]
    pub enrich: bool,

    /// Proceed when the scan matches zero entries.
    #[arg(long, conflicts_with = "fail_empty")]
    pub allow_empty: bool,

    /// Fail when the scan matches zero entries.
    #[arg(long)]
    pub fail_empty: bool,
}

/// Execute the `scan` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never",
///   or "auto")
pub fn execute(args: ScanArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config = super::load_config(&args.config)?;

    // When the JSON goes to stdout, narration moves to stderr
    let json_to_stdout = args.output.is_none();
    let status = |line: String| {
        if json_to_stdout {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    };

    let categories: Vec<Category> = if args.categories.is_empty() {
        config.registry.categories.clone()
    } else {
        args.categories.clone()
    };

    let (document, source_name) = match &args.input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Registry document not found: {}", path.display());
            }
            (fs::read_to_string(path)?, path.display().to_string())
        }
        None => {
            let url = args
                .url
                .clone()
                .unwrap_or_else(|| config.registry.url.clone());
            status(format!(
                "{} Fetching registry document: {}",
                emoji(&out, "🌐", "[NET]"),
                url
            ));
            let body = fetch::fetch_registry(&url, &config.retry.policy())?;
            (body, url)
        }
    };

    let scanner = RegistryScanner::new()?;
    let mut result = scanner.scan(&document, &source_name, &categories)?;

    let empty_policy = if args.allow_empty {
        EmptyScanPolicy::Proceed
    } else if args.fail_empty {
        EmptyScanPolicy::Fail
    } else {
        config.policy.on_empty_scan
    };
    if result.total_servers == 0 && empty_policy == EmptyScanPolicy::Fail {
        return Err(suggestions::zero_entries(&source_name));
    }

    if args.enrich || config.enrichment.enabled {
        let eligible = result
            .entries
            .iter()
            .filter(|e| e.repo_ref.is_some())
            .count();
        status(format!(
            "{} Enriching {} of {} entries...",
            emoji(&out, "🔎", "[LOOKUP]"),
            eligible,
            result.total_servers
        ));
        let enricher = Enricher::new(
            &config.enrichment.api_base,
            config.enrichment.request_delay(),
            std::env::var("GITHUB_TOKEN").ok(),
        )?;
        let bar = ProgressBar::new(result.entries.len() as u64);
        let enriched = enricher.enrich_all(&mut result.entries, |_| bar.inc(1));
        bar.finish_and_clear();
        status(format!(
            "{} Enriched {} entr{}",
            emoji(&out, "✅", "[OK]"),
            enriched,
            if enriched == 1 { "y" } else { "ies" }
        ));
    }

    status(format!("\n{} Scan Summary:", emoji(&out, "📊", "[INFO]")));
    status(format!("   Total servers: {}", result.total_servers));
    for category in &categories {
        status(format!(
            "   {}: {}",
            category.header_label(),
            result.count_for(*category)
        ));
    }

    let json = serde_json::to_string_pretty(&result)?;
    match &args.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))?;
            println!(
                "{} Wrote {} candidate(s) to {}",
                emoji(&out, "✅", "[OK]"),
                result.total_servers,
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
