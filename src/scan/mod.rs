//! Registry document scanning
//!
//! This module turns the raw registry document into an ordered sequence of
//! candidate entries. The scan is a single forward pass over the document's
//! lines, implemented as an explicit fold: each line folds a
//! [`ScanState`](scanner::ScanState) (current section, accumulated entries)
//! into the next, with no shared mutable state outside the accumulator.
//!
//! ## Components
//!
//! - Category tracking (category.rs) - Recognizes section headers and gates
//!   which lines are eligible for extraction
//! - Entry extraction (extract.rs) - Parses one listing line into a candidate
//! - Repository resolution (repo_ref.rs) - Derives owner/repo from the
//!   entry's hosting URL
//! - Scanner (scanner.rs) - Drives the fold and assembles the scan result
//!
//! A line that matches no pattern is not an error; it is simply not a
//! candidate. The only scan-level failure is an empty or absent document.

pub mod category;
pub mod extract;
pub mod repo_ref;
pub mod scanner;

pub use category::CategoryTracker;
pub use extract::{EntryExtractor, ExtractedEntry};
pub use repo_ref::RepoRefResolver;
pub use scanner::{RegistryScanner, ScanState};
