//! # Registry Data Model
//!
//! This module defines the data structures shared across the scan and
//! reconciliation pipeline: the category partition, the candidate entries
//! produced by a scan, and the scan result envelope consumed by downstream
//! change-request tooling.
//!
//! ## Design Notes
//!
//! - A candidate's `owner`/`repo` pair is represented as a single
//!   `Option<RepoRef>`, so the "both present or both absent" invariant holds
//!   by construction rather than by discipline.
//! - Enrichment is a tagged state (`NotFetched` vs `Fetched`), keeping "we
//!   never asked" distinct from "we asked and the upstream had nothing".
//! - Candidates are immutable after creation. A re-scan produces a fresh
//!   sequence; it never mutates entries in place.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The section of the registry document an entry was listed under.
///
/// The category doubles as the storage partition name for approved records:
/// `official/` and `community/` subdirectories of the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    /// Listed under the "Official Integrations" section.
    #[serde(rename = "official")]
    OfficialIntegrations,
    /// Listed under the "Community Servers" section.
    #[serde(rename = "community")]
    CommunityServers,
}

impl Category {
    /// All recognized categories, in document order.
    pub const ALL: [Category; 2] = [Category::OfficialIntegrations, Category::CommunityServers];

    /// The exact section header label in the registry document.
    ///
    /// Header matching is case-sensitive on this label.
    pub fn header_label(&self) -> &'static str {
        match self {
            Category::OfficialIntegrations => "Official Integrations",
            Category::CommunityServers => "Community Servers",
        }
    }

    /// The catalog partition directory name for this category.
    pub fn partition(&self) -> &'static str {
        match self {
            Category::OfficialIntegrations => "official",
            Category::CommunityServers => "community",
        }
    }

    /// Look up a category by its partition name.
    pub fn from_partition(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.partition() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::from_partition(s)
            .ok_or_else(|| format!("unknown category '{}' (expected 'official' or 'community')", s))
    }
}

/// An owner/repository pair resolved from a hosting URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name, with any trailing `.git` stripped.
    pub repo: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Repository metadata fetched from an external metadata source.
///
/// Every field is optional: the upstream may simply not report it, which is
/// distinct from the lookup never having run (see [`Enrichment`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentData {
    /// Primary implementation language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// License identifier (e.g. "MIT", "Apache-2.0").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Star count at fetch time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_count: Option<u64>,
    /// Last-updated timestamp reported by the upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Repository topics.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
}

/// Whether repository metadata has been fetched for a candidate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Enrichment {
    /// The enrichment step has not run for this entry.
    #[default]
    NotFetched,
    /// Metadata was fetched; individual fields may still be absent upstream.
    Fetched(EnrichmentData),
}

/// Review status of a record.
///
/// Candidates are always constructed as `PendingReview`. The approval and
/// rejection transitions belong to the external review workflow; this tool
/// only ever signals that a changed entry needs re-review.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    /// Discovered by a scan and awaiting human review.
    #[default]
    PendingReview,
    /// Approved by the external workflow.
    Approved,
    /// Rejected by the external workflow (terminal).
    Rejected,
}

/// One freshly scanned registry listing.
///
/// Candidates are ephemeral: regenerated on every scan, compared against the
/// approved catalog, and never persisted by this tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateEntry {
    /// Identifier generated at scan time. Fresh on every scan.
    pub id: Uuid,
    /// Display name as extracted from the document, trimmed.
    ///
    /// Not guaranteed unique within a single scan.
    pub identity: String,
    /// Free-text description following the entry link. Empty when the line
    /// carried no separator, never null.
    pub description: String,
    /// Section the entry was listed under.
    pub category: Category,
    /// Link target, verbatim from the document. No normalization.
    pub source_url: String,
    /// Owner/repository pair derived from `source_url`, when the URL matches
    /// a known hosting pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_ref: Option<RepoRef>,
    /// Icon image URL embedded in the listing line, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Date the scan that produced this candidate ran.
    pub discovered_at: NaiveDate,
    /// Repository metadata state.
    #[serde(default)]
    pub enrichment: Enrichment,
    /// Review status. Always `PendingReview` at construction.
    #[serde(default)]
    pub review_state: ReviewState,
}

impl CandidateEntry {
    /// True when this candidate and `other` agree on every field the
    /// reconciler tracks.
    ///
    /// Enrichment and review state are deliberately excluded: they are not
    /// part of the document-derived identity of an entry.
    pub fn tracked_fields_eq(&self, other: &CandidateEntry) -> bool {
        self.identity == other.identity
            && self.source_url == other.source_url
            && self.description == other.description
            && self.category == other.category
    }
}

/// The structured output of a full registry scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// When this result was generated.
    pub generated_at: DateTime<Utc>,
    /// Total number of candidates, across all categories.
    pub total_servers: usize,
    /// Candidate counts keyed by partition name.
    pub categories: BTreeMap<String, usize>,
    /// The candidates, in document order.
    pub entries: Vec<CandidateEntry>,
}

impl ScanResult {
    /// Assemble a result envelope from an ordered candidate sequence,
    /// stamping it with the current time.
    pub fn from_entries(entries: Vec<CandidateEntry>) -> Self {
        let mut categories = BTreeMap::new();
        for entry in &entries {
            *categories
                .entry(entry.category.partition().to_string())
                .or_insert(0) += 1;
        }
        ScanResult {
            generated_at: Utc::now(),
            total_servers: entries.len(),
            categories,
            entries,
        }
    }

    /// Number of candidates in the given category.
    pub fn count_for(&self, category: Category) -> usize {
        self.categories
            .get(category.partition())
            .copied()
            .unwrap_or(0)
    }
}
