//! Hosting-URL resolution
//!
//! Derives an owner/repository pair from an entry's source URL. GitHub is the
//! only resolvable host; both the web form (`https://github.com/owner/repo`)
//! and the SSH form (`git@github.com:owner/repo.git`) are accepted, which is
//! why the pattern allows either `:` or `/` after the host token.
//!
//! Resolution failure is not an error condition. An entry whose URL points
//! anywhere else is still a valid candidate, just one without a resolvable
//! repository reference.

use crate::error::Result;
use crate::model::RepoRef;
use regex::Regex;

/// Owner and repository segments stop at `/`, `?`, and `#`, so path suffixes,
/// query strings, and fragments truncate naturally.
const HOSTING_PATTERN: &str = r"github\.com[:/](?P<owner>[A-Za-z0-9_.-]+)/(?P<repo>[A-Za-z0-9_.-]+)";

/// Resolves owner/repo pairs from hosting URLs.
pub struct RepoRefResolver {
    pattern: Regex,
}

impl RepoRefResolver {
    /// Compile the hosting-URL pattern.
    pub fn new() -> Result<Self> {
        Ok(RepoRefResolver {
            pattern: Regex::new(HOSTING_PATTERN)?,
        })
    }

    /// Attempt to derive `(owner, repo)` from a source URL.
    ///
    /// A trailing `.git` is stripped from the repository name. Returns `None`
    /// for URLs that do not match the hosting pattern.
    pub fn resolve(&self, source_url: &str) -> Option<RepoRef> {
        let caps = self.pattern.captures(source_url)?;
        let owner = caps.name("owner")?.as_str().to_string();
        let repo = caps.name("repo")?.as_str();
        let repo = repo.strip_suffix(".git").unwrap_or(repo).to_string();
        if owner.is_empty() || repo.is_empty() {
            return None;
        }
        Some(RepoRef { owner, repo })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> RepoRefResolver {
        RepoRefResolver::new().unwrap()
    }

    fn resolve(url: &str) -> Option<RepoRef> {
        resolver().resolve(url)
    }

    fn pair(owner: &str, repo: &str) -> Option<RepoRef> {
        Some(RepoRef {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    #[test]
    fn test_plain_https_url() {
        assert_eq!(resolve("https://github.com/acme/widgets"), pair("acme", "widgets"));
    }

    #[test]
    fn test_git_suffix_stripped() {
        assert_eq!(
            resolve("https://github.com/acme/widgets.git"),
            pair("acme", "widgets")
        );
    }

    #[test]
    fn test_path_suffix_truncated() {
        assert_eq!(
            resolve("https://github.com/acme/widgets/tree/main/src/sub"),
            pair("acme", "widgets")
        );
    }

    #[test]
    fn test_ssh_form() {
        assert_eq!(
            resolve("git@github.com:acme/widgets.git"),
            pair("acme", "widgets")
        );
    }

    #[test]
    fn test_query_and_fragment_truncated() {
        assert_eq!(
            resolve("https://github.com/acme/widgets?tab=readme"),
            pair("acme", "widgets")
        );
        assert_eq!(
            resolve("https://github.com/acme/widgets#usage"),
            pair("acme", "widgets")
        );
    }

    #[test]
    fn test_non_github_host_is_unresolvable() {
        assert_eq!(resolve("https://gitlab.com/x/y"), None);
        assert_eq!(resolve("https://example.com/acme/widgets"), None);
    }

    #[test]
    fn test_owner_only_url_is_unresolvable() {
        assert_eq!(resolve("https://github.com/acme"), None);
        assert_eq!(resolve("https://github.com/"), None);
    }

    #[test]
    fn test_dotted_and_hyphenated_names() {
        assert_eq!(
            resolve("https://github.com/some-org/repo.name-v2"),
            pair("some-org", "repo.name-v2")
        );
    }
}
