//! # Repository Metadata Enrichment
//!
//! Optionally decorates scanned candidates with repository metadata from the
//! GitHub API: language, license, star count, last update, and topics. Only
//! candidates with a resolved repository reference are eligible; everything
//! else keeps `Enrichment::NotFetched`.
//!
//! Lookups run sequentially with a fixed pause between requests to stay
//! inside API rate limits. A failed lookup logs a warning and moves on;
//! enrichment is best-effort decoration and must never abort a scan. Unlike
//! the registry fetch, individual lookups are not retried.

use serde::Deserialize;
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::model::{CandidateEntry, Enrichment, EnrichmentData, RepoRef};

/// The subset of the repository metadata response this tool consumes.
#[derive(Debug, Deserialize)]
struct RepoMetadata {
    language: Option<String>,
    license: Option<LicenseInfo>,
    stargazers_count: Option<u64>,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LicenseInfo {
    spdx_id: Option<String>,
}

impl From<RepoMetadata> for EnrichmentData {
    fn from(meta: RepoMetadata) -> Self {
        EnrichmentData {
            language: meta.language,
            license: meta.license.and_then(|l| l.spdx_id),
            star_count: meta.stargazers_count,
            updated_at: meta.updated_at,
            topics: meta.topics,
        }
    }
}

/// Performs sequential metadata lookups against a GitHub-style API.
pub struct Enricher {
    client: reqwest::blocking::Client,
    api_base: String,
    request_delay: Duration,
    token: Option<String>,
}

impl Enricher {
    /// Build an enricher against `api_base` (e.g. `https://api.github.com`).
    ///
    /// `token`, when present, is sent as a bearer credential for the higher
    /// authenticated rate limit.
    pub fn new(api_base: &str, request_delay: Duration, token: Option<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("registry-sync/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Enrichment {
                repo: String::new(),
                message: e.to_string(),
            })?;
        Ok(Enricher {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            request_delay,
            token,
        })
    }

    /// Fetch metadata for one repository. Single attempt, no retry.
    pub fn lookup(&self, repo_ref: &RepoRef) -> Result<EnrichmentData> {
        let url = format!("{}/repos/{}/{}", self.api_base, repo_ref.owner, repo_ref.repo);
        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| Error::Enrichment {
            repo: repo_ref.to_string(),
            message: e.to_string(),
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Enrichment {
                repo: repo_ref.to_string(),
                message: format!("unexpected status {}", status),
            });
        }
        let metadata: RepoMetadata = response.json().map_err(|e| Error::Enrichment {
            repo: repo_ref.to_string(),
            message: e.to_string(),
        })?;
        Ok(metadata.into())
    }

    /// Enrich every eligible candidate in place, pausing between requests.
    ///
    /// `on_progress` fires once per candidate, enriched or not, so callers
    /// can drive a progress display. Returns the number of candidates
    /// actually enriched.
    pub fn enrich_all(
        &self,
        entries: &mut [CandidateEntry],
        mut on_progress: impl FnMut(&CandidateEntry),
    ) -> usize {
        let mut enriched = 0;
        let mut first = true;
        for entry in entries.iter_mut() {
            if let Some(repo_ref) = entry.repo_ref.clone() {
                if !first {
                    thread::sleep(self.request_delay);
                }
                first = false;
                match self.lookup(&repo_ref) {
                    Ok(data) => {
                        entry.enrichment = Enrichment::Fetched(data);
                        enriched += 1;
                    }
                    Err(e) => log::warn!("{}; leaving '{}' unenriched", e, entry.identity),
                }
            }
            on_progress(entry);
        }
        enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, ReviewState};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn candidate(identity: &str, repo_ref: Option<RepoRef>) -> CandidateEntry {
        CandidateEntry {
            id: Uuid::new_v4(),
            identity: identity.to_string(),
            description: String::new(),
            category: Category::CommunityServers,
            source_url: "https://example.com".to_string(),
            repo_ref,
            icon_url: None,
            discovered_at: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            enrichment: Enrichment::NotFetched,
            review_state: ReviewState::PendingReview,
        }
    }

    #[test]
    fn test_metadata_mapping() {
        let metadata = RepoMetadata {
            language: Some("Rust".to_string()),
            license: Some(LicenseInfo {
                spdx_id: Some("MIT".to_string()),
            }),
            stargazers_count: Some(420),
            updated_at: None,
            topics: vec!["mcp".to_string()],
        };
        let data: EnrichmentData = metadata.into();
        assert_eq!(data.language.as_deref(), Some("Rust"));
        assert_eq!(data.license.as_deref(), Some("MIT"));
        assert_eq!(data.star_count, Some(420));
        assert_eq!(data.topics, vec!["mcp"]);
    }

    #[test]
    fn test_license_without_spdx_id_maps_to_none() {
        let metadata = RepoMetadata {
            language: None,
            license: Some(LicenseInfo { spdx_id: None }),
            stargazers_count: None,
            updated_at: None,
            topics: Vec::new(),
        };
        let data: EnrichmentData = metadata.into();
        assert_eq!(data.license, None);
    }

    #[test]
    fn test_metadata_parses_from_api_shape() {
        let body = r#"{
            "language": "TypeScript",
            "license": {"spdx_id": "Apache-2.0", "name": "Apache License 2.0"},
            "stargazers_count": 17,
            "updated_at": "2025-02-03T04:05:06Z",
            "topics": ["registry", "sync"],
            "full_name": "acme/widgets"
        }"#;
        let metadata: RepoMetadata = serde_json::from_str(body).unwrap();
        let data: EnrichmentData = metadata.into();
        assert_eq!(data.language.as_deref(), Some("TypeScript"));
        assert_eq!(data.license.as_deref(), Some("Apache-2.0"));
        assert_eq!(data.star_count, Some(17));
        assert!(data.updated_at.is_some());
    }

    #[test]
    fn test_entries_without_repo_ref_are_skipped() {
        let enricher =
            Enricher::new("https://api.github.invalid", Duration::ZERO, None).unwrap();
        let mut entries = vec![candidate("A", None), candidate("B", None)];
        let mut seen = 0;
        let enriched = enricher.enrich_all(&mut entries, |_| seen += 1);
        assert_eq!(enriched, 0);
        assert_eq!(seen, 2);
        assert!(entries
            .iter()
            .all(|e| e.enrichment == Enrichment::NotFetched));
    }

    #[test]
    fn test_failed_lookup_leaves_entry_unenriched() {
        // Reserved .invalid TLD: the lookup fails without touching a real host
        let enricher =
            Enricher::new("https://api.github.invalid", Duration::ZERO, None).unwrap();
        let mut entries = vec![candidate(
            "A",
            Some(RepoRef {
                owner: "acme".to_string(),
                repo: "widgets".to_string(),
            }),
        )];
        let enriched = enricher.enrich_all(&mut entries, |_| {});
        assert_eq!(enriched, 0);
        assert_eq!(entries[0].enrichment, Enrichment::NotFetched);
    }
}
