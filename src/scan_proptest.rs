//! Property-based tests for the scan components.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::model::Category;
    use crate::scan::{EntryExtractor, RegistryScanner, RepoRefResolver};
    use proptest::prelude::*;

    // ============================================================================
    // Repository reference resolver property tests
    // ============================================================================

    proptest! {
        /// Property: the resolver never panics and never returns a partially
        /// populated pair, whatever the input looks like
        #[test]
        fn resolver_total_on_arbitrary_input(url in ".*") {
            let resolver = RepoRefResolver::new().unwrap();
            if let Some(repo_ref) = resolver.resolve(&url) {
                prop_assert!(!repo_ref.owner.is_empty());
                prop_assert!(!repo_ref.repo.is_empty());
            }
        }

        /// Property: resolution is deterministic
        #[test]
        fn resolver_is_deterministic(url in ".*") {
            let resolver = RepoRefResolver::new().unwrap();
            prop_assert_eq!(resolver.resolve(&url), resolver.resolve(&url));
        }

        /// Property: well-formed GitHub web URLs always resolve, with the
        /// `.git` suffix stripped
        #[test]
        fn resolver_handles_web_urls(
            owner in "[a-zA-Z0-9][a-zA-Z0-9-]{0,10}",
            repo in "[a-zA-Z0-9][a-zA-Z0-9_-]{0,10}",
        ) {
            let resolver = RepoRefResolver::new().unwrap();
            let plain = resolver
                .resolve(&format!("https://github.com/{}/{}", owner, repo))
                .unwrap();
            prop_assert_eq!(&plain.owner, &owner);
            prop_assert_eq!(&plain.repo, &repo);

            let dot_git = resolver
                .resolve(&format!("https://github.com/{}/{}.git", owner, repo))
                .unwrap();
            prop_assert_eq!(&dot_git.repo, &repo);
        }
    }

    // ============================================================================
    // Entry extractor property tests
    // ============================================================================

    proptest! {
        /// Property: extraction never panics on arbitrary lines
        #[test]
        fn extractor_total_on_arbitrary_input(line in ".*") {
            let extractor = EntryExtractor::new().unwrap();
            let _ = extractor.extract(&line);
        }

        /// Property: a well-formed listing line always extracts, with the
        /// identity trimmed and the URL verbatim
        #[test]
        fn extractor_handles_well_formed_lines(
            name in "[a-zA-Z0-9 ]{1,20}",
            url in "https://[a-z]{1,10}\\.com/[a-z0-9/]{1,15}",
            description in "[a-zA-Z0-9,. ]{0,40}",
        ) {
            let extractor = EntryExtractor::new().unwrap();
            let line = format!("- **[{}]({})** - {}", name, url, description);
            let entry = extractor.extract(&line).unwrap();
            prop_assert_eq!(entry.identity, name.trim());
            prop_assert_eq!(entry.source_url, url);
            prop_assert_eq!(entry.description, description.trim());
        }

        /// Property: an extracted entry always carries a source URL
        #[test]
        fn extractor_never_produces_empty_url(line in ".*") {
            let extractor = EntryExtractor::new().unwrap();
            if let Some(entry) = extractor.extract(&line) {
                prop_assert!(!entry.source_url.is_empty());
            }
        }
    }

    // ============================================================================
    // Scanner property tests
    // ============================================================================

    proptest! {
        /// Property: scanning never panics on arbitrary non-empty documents,
        /// and every candidate carries an identity and source URL
        #[test]
        fn scanner_total_on_arbitrary_documents(document in ".{1,400}") {
            prop_assume!(!document.trim().is_empty());
            let scanner = RegistryScanner::new().unwrap();
            let result = scanner.scan(&document, "prop.md", &Category::ALL).unwrap();
            for entry in &result.entries {
                prop_assert!(!entry.identity.is_empty());
                prop_assert!(!entry.source_url.is_empty());
            }
        }

        /// Property: candidate count is bounded by the line count
        #[test]
        fn scanner_yields_at_most_one_candidate_per_line(document in ".{1,400}") {
            prop_assume!(!document.trim().is_empty());
            let scanner = RegistryScanner::new().unwrap();
            let result = scanner.scan(&document, "prop.md", &Category::ALL).unwrap();
            prop_assert!(result.total_servers <= document.lines().count());
        }

        /// Property: without a preceding recognized header, no line ever
        /// produces a candidate
        #[test]
        fn scanner_ignores_everything_before_first_header(
            names in proptest::collection::vec("[a-zA-Z0-9]{1,10}", 1..5),
        ) {
            let document: String = names
                .iter()
                .map(|n| format!("- **[{}](https://github.com/x/{})** - d\n", n, n))
                .collect();
            let scanner = RegistryScanner::new().unwrap();
            let result = scanner.scan(&document, "prop.md", &Category::ALL).unwrap();
            prop_assert_eq!(result.total_servers, 0);
        }
    }
}
