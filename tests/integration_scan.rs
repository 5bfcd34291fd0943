//! Integration tests for the registry scan pipeline.
//!
//! These tests drive the scanner through the library API against complete
//! documents, covering the section gating, extraction, and resolution
//! behavior end to end.
//!
//! ## Running These Tests
//!
//! ```bash
//! cargo test --test integration_scan
//! ```

use registry_sync::model::{Category, Enrichment, ReviewState};
use registry_sync::scan::RegistryScanner;

/// A registry document with one valid entry under each recognized header.
const TWO_SECTION_DOCUMENT: &str = "\
# Example Server Registry

A list of servers.

### Official Integrations

- **[Filesystem](https://github.com/example/filesystem)** - Secure file operations

### Community Servers

- **[Weather](https://github.com/acme/weather)** - Forecasts and alerts
";

#[test]
fn test_two_headers_two_entries() {
    let scanner = RegistryScanner::new().unwrap();
    let result = scanner
        .scan(TWO_SECTION_DOCUMENT, "registry.md", &Category::ALL)
        .unwrap();

    assert_eq!(result.total_servers, 2);
    assert_eq!(result.count_for(Category::OfficialIntegrations), 1);
    assert_eq!(result.count_for(Category::CommunityServers), 1);
}

#[test]
fn test_candidates_start_pending_and_unenriched() {
    let scanner = RegistryScanner::new().unwrap();
    let result = scanner
        .scan(TWO_SECTION_DOCUMENT, "registry.md", &Category::ALL)
        .unwrap();

    for entry in &result.entries {
        assert_eq!(entry.review_state, ReviewState::PendingReview);
        assert_eq!(entry.enrichment, Enrichment::NotFetched);
    }
}

#[test]
fn test_scan_result_serializes_with_counts() {
    let scanner = RegistryScanner::new().unwrap();
    let result = scanner
        .scan(TWO_SECTION_DOCUMENT, "registry.md", &Category::ALL)
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["total_servers"], 2);
    assert_eq!(json["categories"]["official"], 1);
    assert_eq!(json["categories"]["community"], 1);
    assert!(json["generated_at"].is_string());
    assert_eq!(json["entries"][0]["identity"], "Filesystem");
    assert_eq!(json["entries"][0]["category"], "official");
}

#[test]
fn test_scan_result_roundtrips_through_json() {
    let scanner = RegistryScanner::new().unwrap();
    let result = scanner
        .scan(TWO_SECTION_DOCUMENT, "registry.md", &Category::ALL)
        .unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: registry_sync::model::ScanResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.total_servers, result.total_servers);
    assert_eq!(back.entries, result.entries);
}

#[test]
fn test_mixed_document_with_noise() {
    let document = "\
Intro prose.

- **[Premature](https://github.com/too/early)** - listed before any header

### Official Integrations

Some explanation between the header and the listings.

- ![icon](https://cdn.example.com/a.png) **[Alpha](https://github.com/org/alpha)** - First
- [Unemphasized](https://github.com/org/nope) - not bold, skipped
- **[Beta](git@github.com:org/beta.git)** – SSH-style URL
not a listing at all

#### Unrelated Subsection

- **[Hidden](https://github.com/org/hidden)** - still in the official section

### Community Servers

- **[Gamma](https://bitbucket.org/org/gamma)** - unresolvable host
";
    let scanner = RegistryScanner::new().unwrap();
    let result = scanner.scan(document, "registry.md", &Category::ALL).unwrap();

    let names: Vec<&str> = result.entries.iter().map(|e| e.identity.as_str()).collect();
    // An unrelated sub-heading does not close the current section
    assert_eq!(names, vec!["Alpha", "Beta", "Hidden", "Gamma"]);

    let beta = &result.entries[1];
    let repo_ref = beta.repo_ref.as_ref().unwrap();
    assert_eq!(repo_ref.owner, "org");
    assert_eq!(repo_ref.repo, "beta");

    let gamma = result.entries.last().unwrap();
    assert!(gamma.repo_ref.is_none());
    assert_eq!(gamma.category, Category::CommunityServers);
}

#[test]
fn test_large_document_scan_is_linear_and_ordered() {
    let mut document = String::from("### Community Servers\n\n");
    for i in 0..500 {
        document.push_str(&format!(
            "- **[Server {i}](https://github.com/org/server-{i})** - Entry number {i}\n"
        ));
    }
    let scanner = RegistryScanner::new().unwrap();
    let result = scanner.scan(&document, "big.md", &Category::ALL).unwrap();

    assert_eq!(result.total_servers, 500);
    for (i, entry) in result.entries.iter().enumerate() {
        assert_eq!(entry.identity, format!("Server {i}"));
        assert_eq!(entry.repo_ref.as_ref().unwrap().repo, format!("server-{i}"));
    }
}
