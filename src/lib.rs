//! # Registry Sync Library
//!
//! This library provides the core functionality for scanning a markdown
//! server registry and reconciling the results against a version-controlled
//! catalog of approved records. It is designed to be used by the
//! `registry-sync` command-line tool but can also be integrated into other
//! automation that feeds a review pipeline.
//!
//! ## Quick Example
//!
//! ```
//! use registry_sync::model::Category;
//! use registry_sync::scan::RegistryScanner;
//!
//! let document = "\
//! ### Official Integrations
//!
//! - **[Filesystem](https://github.com/example/filesystem)** - Secure file operations
//! ";
//!
//! let scanner = RegistryScanner::new().unwrap();
//! let result = scanner.scan(document, "example.md", &Category::ALL).unwrap();
//!
//! assert_eq!(result.total_servers, 1);
//! assert_eq!(result.entries[0].identity, "Filesystem");
//! assert_eq!(result.entries[0].repo_ref.as_ref().unwrap().owner, "example");
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key concepts:
//!
//! - **Scanning (`scan`)**: A single forward pass over the registry document,
//!   implemented as a fold, that produces an ordered sequence of candidate
//!   entries gated by section headers.
//! - **Catalog (`catalog`)**: The durable, human-approved records, one JSON
//!   file per entry, partitioned by category; loaded and structurally
//!   validated but never written by this library.
//! - **Reconciliation (`reconcile`)**: A pure diff of fresh candidates
//!   against the approved set, producing a proposed changeset (new, changed,
//!   unchanged, conflicts) for the external review workflow.
//! - **Fetching (`fetch`)**: The HTTP collaborator that downloads the
//!   registry document under a configured retry policy.
//! - **Enrichment (`enrich`)**: Optional, best-effort decoration of
//!   candidates with repository metadata from an external API.
//! - **Configuration (`config`)**: The `.registry-sync.yaml` schema; every
//!   field defaults, so configuration is purely declarative overrides.
//!
//! ## Execution Flow
//!
//! A full pipeline run is: fetch (or read) the document → scan it into
//! candidates → optionally enrich → serialize the scan result → load the
//! catalog → reconcile → hand the changeset to review tooling. Each step is
//! independently callable; the CLI commands are thin orchestrations of these
//! library calls.

pub mod catalog;
pub mod config;
pub mod defaults;
pub mod enrich;
pub mod error;
pub mod fetch;
pub mod model;
pub mod output;
pub mod reconcile;
pub mod scan;
pub mod suggestions;

#[cfg(test)]
mod scan_proptest;
