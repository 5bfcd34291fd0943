//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `registry-sync` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and
//!   options, derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! The `execute` function is the main entry point for the command and is
//! responsible for orchestrating the necessary operations, calling into the
//! `registry_sync` library to perform the core logic.

use anyhow::Result;
use std::path::Path;

use registry_sync::{config, defaults, suggestions};

pub mod completions;
pub mod reconcile;
pub mod scan;
pub mod validate;

/// Load the configuration for a command invocation.
///
/// A missing file at the default location means all-defaults; a missing file
/// at an explicitly requested location is an error with hints.
pub(crate) fn load_config(path: &Path) -> Result<config::Config> {
    if path.exists() {
        return config::from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path.display(), e));
    }
    if path == defaults::default_config_path() {
        log::debug!("no configuration at {}; using defaults", path.display());
        return Ok(config::Config::default());
    }
    Err(suggestions::config_not_found(path))
}
