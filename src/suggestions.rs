//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Following CLI recommendations,
//! errors should tell users what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Catalog directory not found: {}", dir.display());
//!
//! // Use:
//! return Err(suggestions::catalog_not_found(dir));
//! ```

use std::path::Path;

/// Generate an error for when the configuration file is not found.
///
/// Includes hints about:
/// - Creating a new config file
/// - Using the -c/--config flag
/// - Using the REGISTRY_SYNC_CONFIG environment variable
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a .registry-sync.yaml file in your project root\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set REGISTRY_SYNC_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for when the catalog directory is not found.
///
/// Includes hints about initializing the partition layout.
pub fn catalog_not_found(dir: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Catalog directory not found: {dir}\n\n\
         hint: Create the partition layout: {dir}/official and {dir}/community\n\
         hint: Use --catalog to point at a different directory",
        dir = dir.display()
    )
}

/// Generate an error for a scan that matched zero entries under the `fail`
/// policy.
///
/// An all-zero scan usually means the upstream document changed shape, not
/// that the registry emptied out.
pub fn zero_entries(source_name: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Scan of {source_name} matched zero entries\n\n\
         hint: The document format may have changed upstream; inspect it manually\n\
         hint: Pass --allow-empty (or set policy.on_empty_scan: proceed) to continue anyway"
    )
}

/// Generate an error for when the scan-result input file is not found.
pub fn scan_result_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Scan result file not found: {path}\n\n\
         hint: Produce one first: registry-sync scan --output {path}",
        path = path.display()
    )
}
