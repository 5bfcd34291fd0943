//! Scan orchestration
//!
//! Drives the line-by-line scan of the registry document. The pass is a fold:
//! [`ScanState`] carries the current section and the accumulated candidates,
//! and [`RegistryScanner::step`] maps one `(state, line)` pair to the next
//! state. This keeps the scanner free of incidental mutable state and makes
//! the per-line behavior testable in isolation.
//!
//! Guarantees:
//! - Result order equals document order (single forward pass, no
//!   backtracking).
//! - Every candidate has a non-empty identity and source URL.
//! - Duplicate names are preserved as separate entries; de-duplication is the
//!   reconciler's concern.
//! - The only failure is an empty or absent document. Zero matching entries
//!   is a valid, empty result; whether that aborts the pipeline is the
//!   caller's policy.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{CandidateEntry, Category, Enrichment, ReviewState, ScanResult};
use crate::scan::{CategoryTracker, EntryExtractor, RepoRefResolver};

/// The fold accumulator for a scan pass.
#[derive(Debug, Default)]
pub struct ScanState {
    /// The category of the most recently seen section header, if any.
    pub current_category: Option<Category>,
    /// Candidates accumulated so far, in document order.
    pub entries: Vec<CandidateEntry>,
}

impl ScanState {
    /// The state before any line has been seen: no category, no entries.
    pub fn start() -> Self {
        ScanState::default()
    }
}

/// Scans a registry document into an ordered candidate sequence.
pub struct RegistryScanner {
    tracker: CategoryTracker,
    extractor: EntryExtractor,
    resolver: RepoRefResolver,
}

impl RegistryScanner {
    /// Compile all scan patterns.
    pub fn new() -> Result<Self> {
        Ok(RegistryScanner {
            tracker: CategoryTracker::new()?,
            extractor: EntryExtractor::new()?,
            resolver: RepoRefResolver::new()?,
        })
    }

    /// Scan a full document.
    ///
    /// `source_name` identifies the document in error messages (a path or
    /// URL). `requested` gates which categories are extracted; listings under
    /// other sections, or before the first recognized header, are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDocument`] when the document contains no
    /// content. A document with content but zero matching listings produces
    /// an empty result.
    pub fn scan(
        &self,
        document: &str,
        source_name: &str,
        requested: &[Category],
    ) -> Result<ScanResult> {
        if document.trim().is_empty() {
            return Err(Error::EmptyDocument {
                source_name: source_name.to_string(),
            });
        }

        let scan_date = Utc::now().date_naive();
        let state = document.lines().fold(ScanState::start(), |state, line| {
            self.step(state, line, requested, scan_date)
        });

        log::debug!(
            "scanned {}: {} candidate(s) across {} line(s)",
            source_name,
            state.entries.len(),
            document.lines().count()
        );

        Ok(ScanResult::from_entries(state.entries))
    }

    /// Fold one line into the scan state.
    ///
    /// In order: (1) a recognized section header updates the current category
    /// and consumes the line; (2) with an active, requested category, the
    /// line is offered to the extractor; (3) a successful extraction is
    /// enriched with a repository reference, a fresh identifier, and the scan
    /// date, then appended. Anything else passes through unchanged.
    pub fn step(
        &self,
        mut state: ScanState,
        line: &str,
        requested: &[Category],
        scan_date: NaiveDate,
    ) -> ScanState {
        if let Some(category) = self.tracker.classify(line) {
            log::trace!("entering section: {}", category);
            state.current_category = Some(category);
            return state;
        }

        let Some(category) = state.current_category else {
            return state;
        };
        if !requested.contains(&category) {
            return state;
        }

        if let Some(extracted) = self.extractor.extract(line) {
            let repo_ref = self.resolver.resolve(&extracted.source_url);
            state.entries.push(CandidateEntry {
                id: Uuid::new_v4(),
                identity: extracted.identity,
                description: extracted.description,
                category,
                source_url: extracted.source_url,
                repo_ref,
                icon_url: extracted.icon_url,
                discovered_at: scan_date,
                enrichment: Enrichment::NotFetched,
                review_state: ReviewState::PendingReview,
            });
        }

        state
    }
}
