//! GitHub API client for the report endpoints.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use serde::de::DeserializeOwned;

use super::error::error_from_response;
use super::pagination::next_page_from_link;
use super::types::{
    CommitRecord, ContributorStats, GitHubRateLimitResponse, PAGE_SIZE, Page, PrState,
    PullRequestRecord,
};
use crate::error::{self, ApiError};
use crate::http::{HttpRequest, HttpResponse, HttpTransport};

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Connection settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL, e.g. `https://api.github.com` or a GitHub Enterprise `/api/v3` root.
    pub api_url: String,
    /// Deadline applied to every request.
    pub timeout: StdDuration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// GitHub API client.
///
/// Wraps an [`HttpTransport`] and exposes the paged listings the reports
/// consume. Every call returns an [`ApiError`] already classified, so callers
/// only decide between the rate-limit and the fatal path.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a new client backed by reqwest.
    #[cfg(feature = "github")]
    pub fn new(token: &str, options: ClientOptions) -> error::Result<Self> {
        use crate::http::reqwest_transport::ReqwestTransport;

        let transport = ReqwestTransport::with_timeout(options.timeout)
            .map_err(|e| ApiError::network(e.to_string()))?;

        Ok(Self::new_with_transport(
            &options.api_url,
            token,
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        api_url: &str,
        token: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Get the API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Make an authenticated GET request and return the raw response.
    async fn send(&self, path: &str) -> error::Result<HttpResponse> {
        let url = format!("{}{}", self.api_url, path);

        let request = HttpRequest::get(url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "scrape")
            .header("Authorization", format!("Bearer {}", self.token));

        let response = self.transport.get(request).await?;

        if let Some(remaining) = response.header("x-ratelimit-remaining") {
            tracing::trace!(path, remaining, "Rate limit remaining");
        }

        Ok(response)
    }

    /// GET a JSON document, classifying non-success statuses.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, resource: &str) -> error::Result<T> {
        let response = self.send(path).await?;
        if !response.is_success() {
            return Err(error_from_response(&response, resource));
        }
        decode(&response.body)
    }

    /// GET one page of a listing and read the next page from the Link header.
    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
    ) -> error::Result<Page<T>> {
        let response = self.send(path).await?;
        if !response.is_success() {
            return Err(error_from_response(&response, resource));
        }

        let next_page = response
            .header("link")
            .and_then(next_page_from_link)
            .unwrap_or(0);

        let items: Vec<T> = decode(&response.body)?;
        tracing::debug!(
            path,
            count = items.len(),
            next_page,
            "Fetched page"
        );

        Ok(Page::new(items, next_page))
    }

    /// List one page of a repository's commit history.
    pub async fn list_commits(
        &self,
        org: &str,
        repo: &str,
        page: u32,
    ) -> error::Result<Page<CommitRecord>> {
        let path = format!(
            "/repos/{}/{}/commits?per_page={}&page={}",
            org, repo, PAGE_SIZE, page
        );
        self.get_page(&path, &format!("{}/{}", org, repo)).await
    }

    /// List one page of a repository's pull requests in the given state.
    pub async fn list_pull_requests(
        &self,
        org: &str,
        repo: &str,
        state: PrState,
        page: u32,
    ) -> error::Result<Page<PullRequestRecord>> {
        let path = format!(
            "/repos/{}/{}/pulls?state={}&per_page={}&page={}",
            org, repo, state, PAGE_SIZE, page
        );
        self.get_page(&path, &format!("{}/{}", org, repo)).await
    }

    /// Fetch contributor statistics (GitHub caps this list at the top 100).
    ///
    /// GitHub answers 202 while it computes statistics for a repository for
    /// the first time; that is reported as [`ApiError::StatsPending`].
    pub async fn list_contributor_stats(
        &self,
        org: &str,
        repo: &str,
    ) -> error::Result<Vec<ContributorStats>> {
        let path = format!("/repos/{}/{}/stats/contributors", org, repo);
        let resource = format!("{}/{}", org, repo);

        let response = self.send(&path).await?;
        if response.status == 202 {
            return Err(ApiError::StatsPending { resource });
        }
        if !response.is_success() {
            return Err(error_from_response(&response, &resource));
        }
        // An empty body is returned for repositories without history.
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        decode(&response.body)
    }

    /// Get current rate limit status for all resources.
    pub async fn get_rate_limit(&self) -> error::Result<GitHubRateLimitResponse> {
        self.get_json("/rate_limit", "rate_limit").await
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> error::Result<T> {
    serde_json::from_slice(body).map_err(|e| ApiError::decode(e.to_string()))
}
