//! # Candidate / Catalog Reconciliation
//!
//! Compares a freshly scanned candidate sequence against the approved
//! catalog, keyed by identity, and partitions the result into **new**,
//! **changed**, and **unchanged**. Comparison is exact string equality on the
//! tracked fields only: `source_url` and `description`. Enrichment fields,
//! tags, and custom metadata are human-owned and never compared, so a
//! re-scan can never clobber them.
//!
//! The changeset is a proposal for the external review workflow: this module
//! computes a diff in memory and applies nothing. A changed entry is the
//! signal that an approved record needs re-review; executing that transition
//! belongs to the approval collaborator.
//!
//! Duplicate identities within a single scan are legitimate input (the
//! document may repeat a name across sections). When the duplicates disagree
//! on `source_url` the conflict is surfaced for human disambiguation; all
//! candidates are retained and classified normally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::ApprovedRecord;
use crate::model::CandidateEntry;

/// One tracked-field difference between a candidate and its approved record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDiff {
    /// Name of the differing field (`source_url` or `description`).
    pub field: String,
    /// The value currently approved.
    pub approved: String,
    /// The value the latest scan found.
    pub candidate: String,
}

/// A candidate whose approved record differs on at least one tracked field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedEntry {
    pub identity: String,
    pub differences: Vec<FieldDiff>,
    pub candidate: CandidateEntry,
}

/// An identity that maps to more than one source URL within a single scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conflict {
    pub identity: String,
    /// The distinct URLs, in document order.
    pub source_urls: Vec<String>,
}

/// The proposed changeset produced by one reconciliation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Changeset {
    pub generated_at: DateTime<Utc>,
    /// Candidates with no approved record.
    pub new: Vec<CandidateEntry>,
    /// Candidates whose approved record differs on a tracked field.
    pub changed: Vec<ChangedEntry>,
    /// Identities present in both sets with no tracked-field difference.
    pub unchanged: Vec<String>,
    /// Same-name candidates that disagree on `source_url`.
    pub conflicts: Vec<Conflict>,
}

impl Changeset {
    /// True when nothing requires review: no additions, no changes, and no
    /// conflicts awaiting disambiguation.
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.changed.is_empty() && self.conflicts.is_empty()
    }
}

/// Diff candidates against the approved set.
///
/// Candidates are classified in document order. When the approved set holds
/// duplicate identities (one name approved in both partitions), the later
/// record wins and the duplication is logged.
pub fn reconcile(candidates: &[CandidateEntry], approved: &[ApprovedRecord]) -> Changeset {
    let mut by_identity: HashMap<&str, &ApprovedRecord> = HashMap::new();
    for record in approved {
        if by_identity.insert(record.identity.as_str(), record).is_some() {
            log::warn!(
                "approved set contains duplicate identity '{}'; keeping the later record",
                record.identity
            );
        }
    }

    let mut changeset = Changeset {
        generated_at: Utc::now(),
        new: Vec::new(),
        changed: Vec::new(),
        unchanged: Vec::new(),
        conflicts: Vec::new(),
    };

    for candidate in candidates {
        match by_identity.get(candidate.identity.as_str()) {
            None => changeset.new.push(candidate.clone()),
            Some(record) => {
                let differences = tracked_diffs(candidate, record);
                if differences.is_empty() {
                    if !changeset.unchanged.contains(&candidate.identity) {
                        changeset.unchanged.push(candidate.identity.clone());
                    }
                } else {
                    changeset.changed.push(ChangedEntry {
                        identity: candidate.identity.clone(),
                        differences,
                        candidate: candidate.clone(),
                    });
                }
            }
        }
    }

    changeset.conflicts = find_conflicts(candidates);
    changeset
}

/// Exact-equality comparison of the tracked fields.
fn tracked_diffs(candidate: &CandidateEntry, record: &ApprovedRecord) -> Vec<FieldDiff> {
    let mut diffs = Vec::new();
    if candidate.source_url != record.source_url {
        diffs.push(FieldDiff {
            field: "source_url".to_string(),
            approved: record.source_url.clone(),
            candidate: candidate.source_url.clone(),
        });
    }
    if candidate.description != record.description {
        diffs.push(FieldDiff {
            field: "description".to_string(),
            approved: record.description.clone(),
            candidate: candidate.description.clone(),
        });
    }
    diffs
}

/// Identities whose candidates disagree on `source_url` within this scan.
fn find_conflicts(candidates: &[CandidateEntry]) -> Vec<Conflict> {
    let mut urls_by_identity: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for candidate in candidates {
        let urls = urls_by_identity
            .entry(candidate.identity.as_str())
            .or_insert_with(|| {
                order.push(candidate.identity.as_str());
                Vec::new()
            });
        if !urls.contains(&candidate.source_url.as_str()) {
            urls.push(candidate.source_url.as_str());
        }
    }

    order
        .into_iter()
        .filter_map(|identity| {
            let urls = &urls_by_identity[identity];
            (urls.len() > 1).then(|| Conflict {
                identity: identity.to_string(),
                source_urls: urls.iter().map(|u| u.to_string()).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Enrichment, ReviewState};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn candidate(identity: &str, url: &str, description: &str) -> CandidateEntry {
        CandidateEntry {
            id: Uuid::new_v4(),
            identity: identity.to_string(),
            description: description.to_string(),
            category: Category::CommunityServers,
            source_url: url.to_string(),
            repo_ref: None,
            icon_url: None,
            discovered_at: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            enrichment: Enrichment::NotFetched,
            review_state: ReviewState::PendingReview,
        }
    }

    fn record(identity: &str, url: &str, description: &str) -> ApprovedRecord {
        ApprovedRecord {
            identity: identity.to_string(),
            description: description.to_string(),
            source_url: url.to_string(),
            category: Category::CommunityServers,
            approver_id: "alice".to_string(),
            approval_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            security_review: None,
            tags: Vec::new(),
            metadata: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_new_and_unchanged_partitions() {
        let approved = vec![record("A", "https://github.com/x/a", "d")];
        let candidates = vec![
            candidate("A", "https://github.com/x/a", "d"),
            candidate("B", "https://github.com/x/b", "d"),
        ];
        let changeset = reconcile(&candidates, &approved);

        assert_eq!(changeset.new.len(), 1);
        assert_eq!(changeset.new[0].identity, "B");
        assert!(changeset.changed.is_empty());
        assert_eq!(changeset.unchanged, vec!["A"]);
        assert!(changeset.conflicts.is_empty());
    }

    #[test]
    fn test_changed_source_url_named_in_diff() {
        let approved = vec![record("A", "https://github.com/x/a", "d")];
        let candidates = vec![candidate("A", "https://github.com/y/a", "d")];
        let changeset = reconcile(&candidates, &approved);

        assert!(changeset.new.is_empty());
        assert!(changeset.unchanged.is_empty());
        assert_eq!(changeset.changed.len(), 1);
        let changed = &changeset.changed[0];
        assert_eq!(changed.identity, "A");
        assert_eq!(changed.differences.len(), 1);
        assert_eq!(changed.differences[0].field, "source_url");
        assert_eq!(changed.differences[0].approved, "https://github.com/x/a");
        assert_eq!(changed.differences[0].candidate, "https://github.com/y/a");
    }

    #[test]
    fn test_changed_description_detected() {
        let approved = vec![record("A", "https://github.com/x/a", "old text")];
        let candidates = vec![candidate("A", "https://github.com/x/a", "new text")];
        let changeset = reconcile(&candidates, &approved);
        assert_eq!(changeset.changed.len(), 1);
        assert_eq!(changeset.changed[0].differences[0].field, "description");
    }

    #[test]
    fn test_both_fields_changed_reports_both() {
        let approved = vec![record("A", "https://github.com/x/a", "old")];
        let candidates = vec![candidate("A", "https://github.com/y/a", "new")];
        let changeset = reconcile(&candidates, &approved);
        let fields: Vec<&str> = changeset.changed[0]
            .differences
            .iter()
            .map(|d| d.field.as_str())
            .collect();
        assert_eq!(fields, vec!["source_url", "description"]);
    }

    #[test]
    fn test_comparison_is_exact_not_normalized() {
        // Trailing slash makes a different URL: exact string equality only
        let approved = vec![record("A", "https://github.com/x/a", "d")];
        let candidates = vec![candidate("A", "https://github.com/x/a/", "d")];
        let changeset = reconcile(&candidates, &approved);
        assert_eq!(changeset.changed.len(), 1);
    }

    #[test]
    fn test_human_owned_fields_never_compared() {
        let mut approved = record("A", "https://github.com/x/a", "d");
        approved.tags = vec!["database".to_string()];
        approved
            .metadata
            .insert("team".to_string(), serde_json::json!("platform"));
        let candidates = vec![candidate("A", "https://github.com/x/a", "d")];
        let changeset = reconcile(&candidates, &[approved]);
        assert_eq!(changeset.unchanged, vec!["A"]);
        assert!(changeset.changed.is_empty());
    }

    #[test]
    fn test_conflicting_duplicates_flagged_and_retained() {
        let candidates = vec![
            candidate("A", "https://github.com/x/a", "d"),
            candidate("A", "https://github.com/y/a", "d"),
        ];
        let changeset = reconcile(&candidates, &[]);

        // Both retained as new candidates
        assert_eq!(changeset.new.len(), 2);
        // And the disagreement surfaced
        assert_eq!(changeset.conflicts.len(), 1);
        assert_eq!(changeset.conflicts[0].identity, "A");
        assert_eq!(
            changeset.conflicts[0].source_urls,
            vec!["https://github.com/x/a", "https://github.com/y/a"]
        );
    }

    #[test]
    fn test_agreeing_duplicates_are_not_conflicts() {
        let candidates = vec![
            candidate("A", "https://github.com/x/a", "d"),
            candidate("A", "https://github.com/x/a", "other text"),
        ];
        let changeset = reconcile(&candidates, &[]);
        assert!(changeset.conflicts.is_empty());
    }

    #[test]
    fn test_unchanged_identity_listed_once() {
        let approved = vec![record("A", "https://github.com/x/a", "d")];
        let candidates = vec![
            candidate("A", "https://github.com/x/a", "d"),
            candidate("A", "https://github.com/x/a", "d"),
        ];
        let changeset = reconcile(&candidates, &approved);
        assert_eq!(changeset.unchanged, vec!["A"]);
    }

    #[test]
    fn test_empty_candidates_empty_changeset() {
        let approved = vec![record("A", "https://github.com/x/a", "d")];
        let changeset = reconcile(&[], &approved);
        assert!(changeset.is_empty());
        assert!(changeset.unchanged.is_empty());
    }

    #[test]
    fn test_is_empty_counts_conflicts() {
        let candidates = vec![
            candidate("A", "https://github.com/x/a", "d"),
            candidate("A", "https://github.com/y/a", "d"),
        ];
        let changeset = reconcile(&candidates, &[]);
        assert!(!changeset.is_empty());
    }
}
