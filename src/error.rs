//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `registry-sync` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the application to simplify function signatures and ensure
//!   type safety.
//!
//! Parsing-level anomalies (a line that does not look like an entry, a URL
//! that does not resolve to a repository) are not errors at all and never
//! appear here; they are absorbed at the scan layer. The variants below cover
//! the structural failures that must be surfaced to the caller: unreadable
//! configuration, an unreachable or empty registry document, unreadable or
//! malformed catalog records, and I/O or serialization problems.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for registry-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the `.registry-sync.yaml` configuration
    /// file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The registry document could not be fetched after exhausting the retry
    /// budget.
    ///
    /// Includes the URL, the number of attempts made, and the final error.
    #[error("Registry fetch failed for {url} after {attempts} attempt(s): {message}")]
    Fetch {
        url: String,
        attempts: u32,
        message: String,
    },

    /// The registry document was empty or missing.
    ///
    /// A document with zero *matching* entries is a valid result; a document
    /// with no content at all aborts the scan.
    #[error("Registry document is empty: {source_name}")]
    EmptyDocument { source_name: String },

    /// A catalog partition directory could not be read.
    #[error("Catalog read error for {}: {message}", path.display())]
    CatalogRead { path: PathBuf, message: String },

    /// An approved record file could not be parsed into the expected shape.
    #[error("Malformed approved record {}: {message}", file.display())]
    RecordParse { file: PathBuf, message: String },

    /// An error occurred during an enrichment lookup.
    #[error("Enrichment lookup failed for {repo}: {message}")]
    Enrichment { repo: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
