//! GitHub API data types.
//!
//! Only the fields the reports read are modelled. Everything is optional so
//! that a record with missing pieces still deserializes and is folded with
//! sentinel values instead of being rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum page size accepted by the GitHub REST API.
pub const PAGE_SIZE: u32 = 100;

/// First page number of a listing.
pub const FIRST_PAGE: u32 = 1;

/// One page of a paged listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Page to request next, or 0 when this was the last page.
    pub next_page: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page: u32) -> Self {
        Self { items, next_page }
    }

    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.next_page != 0
    }
}

/// Account reference embedded in commits, pull requests and statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimpleUser {
    #[serde(default)]
    pub login: Option<String>,
}

/// Git-level author signature of a commit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitSignature {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub author: Option<GitSignature>,
}

/// An entry of `GET /repos/{owner}/{repo}/commits`.
///
/// `author` is the linked GitHub account, which is absent when the commit
/// email does not map to any account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitRecord {
    #[serde(default)]
    pub author: Option<SimpleUser>,
    #[serde(default)]
    pub commit: CommitDetail,
}

/// An entry of `GET /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestRecord {
    #[serde(default)]
    pub user: Option<SimpleUser>,
}

/// An entry of `GET /repos/{owner}/{repo}/stats/contributors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributorStats {
    #[serde(default)]
    pub author: Option<SimpleUser>,
    /// Total commits authored by this contributor.
    #[serde(default)]
    pub total: u64,
}

/// Pull request lifecycle state used to filter listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
}

impl PrState {
    pub fn as_str(self) -> &'static str {
        match self {
            PrState::Open => "open",
            PrState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rate limit resource entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResource {
    /// Maximum requests allowed per period.
    pub limit: usize,
    /// Requests used in current period.
    #[serde(default)]
    pub used: usize,
    /// Remaining requests in current period.
    pub remaining: usize,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
}

impl RateLimitResource {
    /// Get the reset time as a DateTime.
    pub fn reset_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.reset as i64, 0).unwrap_or_else(Utc::now)
    }
}

/// Rate limit resources from GitHub's API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRateLimits {
    /// Core API rate limit (non-search REST endpoints).
    pub core: RateLimitResource,
    /// Search API rate limit.
    #[serde(default)]
    pub search: Option<RateLimitResource>,
    /// Code search API rate limit.
    #[serde(default)]
    pub code_search: Option<RateLimitResource>,
    /// GraphQL API rate limit.
    #[serde(default)]
    pub graphql: Option<RateLimitResource>,
    /// Integration manifest API rate limit.
    #[serde(default)]
    pub integration_manifest: Option<RateLimitResource>,
    /// Source import API rate limit.
    #[serde(default)]
    pub source_import: Option<RateLimitResource>,
    /// Code scanning upload rate limit.
    #[serde(default)]
    pub code_scanning_upload: Option<RateLimitResource>,
    /// Dependency snapshots rate limit.
    #[serde(default)]
    pub dependency_snapshots: Option<RateLimitResource>,
}

impl GitHubRateLimits {
    /// All present resources paired with their API names.
    pub fn named(&self) -> Vec<(&'static str, &RateLimitResource)> {
        let mut items = vec![("core", &self.core)];
        let optional = [
            ("search", &self.search),
            ("code_search", &self.code_search),
            ("graphql", &self.graphql),
            ("integration_manifest", &self.integration_manifest),
            ("source_import", &self.source_import),
            ("code_scanning_upload", &self.code_scanning_upload),
            ("dependency_snapshots", &self.dependency_snapshots),
        ];
        for (name, resource) in optional {
            if let Some(r) = resource {
                items.push((name, r));
            }
        }
        items
    }
}

/// Full rate limit response from GitHub's API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRateLimitResponse {
    pub resources: GitHubRateLimits,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_record_with_author_and_email() {
        let json = r#"{
            "sha": "abc123",
            "author": { "login": "alice", "id": 1 },
            "commit": {
                "author": { "name": "Alice", "email": "a@x.com", "date": "2017-01-01T00:00:00Z" },
                "message": "initial"
            }
        }"#;

        let record: CommitRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.author.unwrap().login.as_deref(), Some("alice"));
        assert_eq!(
            record.commit.author.unwrap().email.as_deref(),
            Some("a@x.com")
        );
    }

    #[test]
    fn test_commit_record_without_linked_account() {
        let json = r#"{ "sha": "abc123", "author": null, "commit": { "author": null } }"#;

        let record: CommitRecord = serde_json::from_str(json).unwrap();
        assert!(record.author.is_none());
        assert!(record.commit.author.is_none());
    }

    #[test]
    fn test_commit_record_missing_commit_object() {
        let record: CommitRecord = serde_json::from_str("{}").unwrap();
        assert!(record.author.is_none());
        assert!(record.commit.author.is_none());
    }

    #[test]
    fn test_pull_request_record() {
        let json = r#"[{ "number": 7, "user": { "login": "bob" } }, { "number": 8, "user": null }]"#;

        let prs: Vec<PullRequestRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(prs.len(), 2);
        assert_eq!(
            prs[0].user.as_ref().and_then(|u| u.login.as_deref()),
            Some("bob")
        );
        assert!(prs[1].user.is_none());
    }

    #[test]
    fn test_contributor_stats() {
        let json = r#"[{ "author": { "login": "carol" }, "total": 135, "weeks": [] }]"#;

        let stats: Vec<ContributorStats> = serde_json::from_str(json).unwrap();
        assert_eq!(stats[0].total, 135);
    }

    #[test]
    fn test_pr_state_as_str() {
        assert_eq!(PrState::Open.as_str(), "open");
        assert_eq!(PrState::Closed.to_string(), "closed");
    }

    #[test]
    fn test_page_has_next() {
        assert!(Page::new(vec![1, 2], 2).has_next());
        assert!(!Page::<u8>::new(vec![], 0).has_next());
    }

    #[test]
    fn test_rate_limit_resource_reset_at() {
        let resource = RateLimitResource {
            limit: 5000,
            used: 100,
            remaining: 4900,
            reset: 2000000000,
        };

        assert_eq!(resource.reset_at().timestamp(), 2000000000);
    }

    #[test]
    fn test_github_rate_limit_response() {
        let json = r#"{
            "resources": {
                "core": { "limit": 5000, "used": 100, "remaining": 4900, "reset": 1700000000 },
                "search": { "limit": 30, "used": 5, "remaining": 25, "reset": 1700000000 },
                "graphql": { "limit": 5000, "used": 50, "remaining": 4950, "reset": 1700000000 }
            },
            "rate": { "limit": 5000, "used": 100, "remaining": 4900, "reset": 1700000000 }
        }"#;

        let response: GitHubRateLimitResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.resources.core.limit, 5000);
        assert!(response.resources.code_search.is_none());

        let names: Vec<_> = response
            .resources
            .named()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["core", "search", "graphql"]);
    }
}
