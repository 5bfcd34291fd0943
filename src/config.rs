//! # Configuration Schema and Parsing
//!
//! This module defines the data structures that represent the
//! `.registry-sync.yaml` configuration file, as well as the logic for parsing
//! it. Every field carries a default, so a missing or empty configuration
//! file is equivalent to an all-defaults run; the file only needs to state
//! what differs.
//!
//! ## Sections
//!
//! - **`registry`**: where the registry document lives and which categories
//!   a scan should extract.
//! - **`catalog`**: where the approved-record catalog lives on disk.
//! - **`policy`**: pipeline policy decisions, currently whether a scan that
//!   matches zero entries fails or proceeds with an empty result.
//! - **`retry`**: the fetch retry budget (attempts, delay, backoff shape).
//! - **`enrichment`**: whether and where to fetch repository metadata.
//!
//! ## Example
//!
//! ```yaml
//! registry:
//!   url: https://raw.githubusercontent.com/modelcontextprotocol/servers/main/README.md
//!   categories: [official, community]
//! catalog:
//!   dir: catalog
//! policy:
//!   on_empty_scan: fail
//! retry:
//!   max_attempts: 3
//!   delay_ms: 2000
//!   backoff: fixed
//! enrichment:
//!   enabled: false
//!   request_delay_ms: 500
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::defaults;
use crate::error::{Error, Result};
use crate::fetch::{Backoff, RetryPolicy};
use crate::model::Category;

/// What to do when a scan produces zero candidates.
///
/// An all-zero result from a document that used to produce hundreds is more
/// often a silently changed upstream format than a genuinely emptied
/// registry, so the safe default is to stop the pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmptyScanPolicy {
    /// Treat zero extracted candidates as a pipeline failure.
    #[default]
    Fail,
    /// Proceed with an empty result and let downstream tooling decide.
    Proceed,
}

/// The `registry` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrySection {
    /// URL of the registry document.
    #[serde(default = "defaults::default_registry_url")]
    pub url: String,
    /// Categories a scan extracts, by partition name.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
}

impl Default for RegistrySection {
    fn default() -> Self {
        RegistrySection {
            url: defaults::default_registry_url(),
            categories: default_categories(),
        }
    }
}

fn default_categories() -> Vec<Category> {
    Category::ALL.to_vec()
}

/// The `catalog` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogSection {
    /// Root of the approved-record catalog (holds the partition
    /// subdirectories).
    #[serde(default = "defaults::default_catalog_dir")]
    pub dir: PathBuf,
}

impl Default for CatalogSection {
    fn default() -> Self {
        CatalogSection {
            dir: defaults::default_catalog_dir(),
        }
    }
}

/// The `policy` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PolicySection {
    #[serde(default)]
    pub on_empty_scan: EmptyScanPolicy,
}

/// The `retry` section, in file-friendly units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrySection {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default)]
    pub backoff: Backoff,
}

impl Default for RetrySection {
    fn default() -> Self {
        RetrySection {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
            backoff: Backoff::Fixed,
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    2000
}

impl RetrySection {
    /// The runtime retry policy this section describes.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay: Duration::from_millis(self.delay_ms),
            backoff: self.backoff,
        }
    }
}

/// The `enrichment` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentSection {
    /// Whether `scan` runs the enrichment step by default.
    #[serde(default)]
    pub enabled: bool,
    /// Base URL of the metadata API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Pause between metadata requests, for rate-limit compliance.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

impl Default for EnrichmentSection {
    fn default() -> Self {
        EnrichmentSection {
            enabled: false,
            api_base: default_api_base(),
            request_delay_ms: default_request_delay_ms(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_request_delay_ms() -> u64 {
    500
}

impl EnrichmentSection {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

/// The whole `.registry-sync.yaml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistrySection,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub policy: PolicySection,
    #[serde(default)]
    pub retry: RetrySection,
    #[serde(default)]
    pub enrichment: EnrichmentSection,
}

/// Parse a YAML string into a [`Config`].
///
/// An empty document is the all-defaults configuration.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if yaml_content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "check field names and indentation against the documented sections \
             (registry, catalog, policy, retry, enrichment)"
                .to_string(),
        ),
    })
}

/// Read and parse a configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load the configuration at `path`, falling back to defaults when the file
/// does not exist.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if path.exists() {
        from_file(path)
    } else {
        log::debug!(
            "no configuration at {}; using defaults",
            path.display()
        );
        Ok(Config::default())
    }
}
