//! Report drivers: one per command, each wiring a listing through the
//! paginator, tally and ranker into a [`Report`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{self, ApiError, ReportError};
use crate::github::{
    CommitRecord, GitHubClient, Page, PrState, PullRequestRecord, RateLimitResource,
};
use crate::paginate::{Outcome, PageSource, Paginator};
use crate::progress::ProgressCallback;
use crate::rank::{TopRankMode, rank, rank_contributors};
use crate::report::{Report, ReportKind};

/// Options shared by the drivers.
#[derive(Clone, Copy, Default)]
pub struct DriverOptions<'a> {
    pub on_progress: Option<&'a ProgressCallback>,
    /// Checked before every request, and after the single stats request.
    pub cancel: Option<&'a AtomicBool>,
}

impl DriverOptions<'_> {
    fn cancelled(&self) -> bool {
        self.cancel.is_some_and(|f| f.load(Ordering::Acquire))
    }
}

/// Commit history of one repository.
pub struct CommitSource<'a> {
    client: &'a GitHubClient,
    org: &'a str,
    repo: &'a str,
}

impl<'a> CommitSource<'a> {
    pub fn new(client: &'a GitHubClient, org: &'a str, repo: &'a str) -> Self {
        Self { client, org, repo }
    }
}

#[async_trait]
impl PageSource for CommitSource<'_> {
    type Record = CommitRecord;

    async fn fetch_page(&self, page: u32) -> error::Result<Page<CommitRecord>> {
        self.client.list_commits(self.org, self.repo, page).await
    }
}

/// Pull requests of one repository in a single state.
pub struct PullRequestSource<'a> {
    client: &'a GitHubClient,
    org: &'a str,
    repo: &'a str,
    state: PrState,
}

impl<'a> PullRequestSource<'a> {
    pub fn new(client: &'a GitHubClient, org: &'a str, repo: &'a str, state: PrState) -> Self {
        Self {
            client,
            org,
            repo,
            state,
        }
    }
}

#[async_trait]
impl PageSource for PullRequestSource<'_> {
    type Record = PullRequestRecord;

    async fn fetch_page(&self, page: u32) -> error::Result<Page<PullRequestRecord>> {
        self.client
            .list_pull_requests(self.org, self.repo, self.state, page)
            .await
    }
}

/// Page through `source`, rank the tally and build the report.
///
/// A rate-limited run still produces a (partial) report; cancellation does not.
pub async fn paged_report<S: PageSource + ?Sized>(
    source: &S,
    kind: ReportKind,
    repository: String,
    options: DriverOptions<'_>,
) -> Result<Report, ReportError> {
    let collected = Paginator::new(source)
        .on_progress(options.on_progress)
        .cancel_flag(options.cancel)
        .collect()
        .await?;

    if collected.outcome == Outcome::Interrupted {
        return Err(ReportError::Interrupted);
    }

    tracing::debug!(
        pages = collected.pages_fetched,
        records = collected.records,
        authors = collected.tally.len(),
        "Ranking tally"
    );

    Ok(Report::from_ranked(
        kind,
        repository,
        rank(collected.tally),
        collected.outcome,
    ))
}

/// Rank commit authors by number of commits.
pub async fn commits_report(
    client: &GitHubClient,
    org: &str,
    repo: &str,
    options: DriverOptions<'_>,
) -> Result<Report, ReportError> {
    let source = CommitSource::new(client, org, repo);
    paged_report(&source, ReportKind::Commits, format!("{org}/{repo}"), options).await
}

/// Rank pull request authors by number of pull requests in `state`.
pub async fn pull_requests_report(
    client: &GitHubClient,
    org: &str,
    repo: &str,
    state: PrState,
    options: DriverOptions<'_>,
) -> Result<Report, ReportError> {
    let source = PullRequestSource::new(client, org, repo, state);
    paged_report(
        &source,
        ReportKind::PullRequests { state },
        format!("{org}/{repo}"),
        options,
    )
    .await
}

/// Rank the top contributors from the contributor statistics endpoint.
///
/// This is a single request, so a rate limit leaves nothing to report and is
/// returned as an error after the notice is logged.
pub async fn top_contributors_report(
    client: &GitHubClient,
    org: &str,
    repo: &str,
    mode: TopRankMode,
    options: DriverOptions<'_>,
) -> Result<Report, ReportError> {
    if options.cancelled() {
        return Err(ReportError::Interrupted);
    }

    let stats = match client.list_contributor_stats(org, repo).await {
        Ok(stats) => stats,
        Err(err) => {
            if err.is_rate_limited() {
                tracing::warn!(reset_at = ?err.reset_at(), "hit rate limit");
            }
            return Err(err.into());
        }
    };

    // Ctrl+C during the request
    if options.cancelled() {
        return Err(ReportError::Interrupted);
    }

    Ok(Report::from_ranked(
        ReportKind::TopContributors,
        format!("{org}/{repo}"),
        rank_contributors(stats, mode),
        Outcome::Complete,
    ))
}

/// Remaining request quota for the core API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateStatus {
    pub remaining: usize,
    pub limit: usize,
    pub used: usize,
    pub reset_at: DateTime<Utc>,
}

impl From<&RateLimitResource> for RateStatus {
    fn from(resource: &RateLimitResource) -> Self {
        Self {
            remaining: resource.remaining,
            limit: resource.limit,
            used: resource.used,
            reset_at: resource.reset_at(),
        }
    }
}

impl fmt::Display for RateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} requests", self.remaining, self.limit)
    }
}

/// Fetch the core API quota.
pub async fn rate_status(client: &GitHubClient) -> Result<RateStatus, ApiError> {
    let limits = client.get_rate_limit().await?;
    Ok(RateStatus::from(&limits.resources.core))
}
