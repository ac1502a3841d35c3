//! Scrape - repository activity statistics from the GitHub API.
//!
//! Pages through a repository's commits or pull requests, tallies them per
//! author, and renders a ranked table. Contributor statistics and the API
//! quota are available as single-request reports.
//!
//! # Features
//!
//! - `github` (default) - Enables the reqwest-backed transport used by
//!   [`GitHubClient::new`]. Without it, supply your own [`HttpTransport`].
//!
//! # Example
//!
//! ```ignore
//! use scrape::{ClientOptions, DriverOptions, GitHubClient, commits_report, report};
//!
//! let client = GitHubClient::new(&token, ClientOptions::default())?;
//! let report = commits_report(&client, "dmmcquay", "sqrl", DriverOptions::default()).await?;
//! report::write_text(&report, std::io::stdout().lock())?;
//! ```

pub mod drivers;
pub mod error;
pub mod github;
pub mod http;
pub mod paginate;
pub mod progress;
pub mod rank;
pub mod report;
pub mod tally;

pub use drivers::{
    CommitSource, DriverOptions, PullRequestSource, RateStatus, commits_report, paged_report,
    pull_requests_report, rate_status, top_contributors_report,
};
pub use error::{ApiError, ErrorClass, ReportError, short_error_message};
pub use github::{ClientOptions, GitHubClient, PrState};
pub use http::HttpTransport;
pub use paginate::{Collected, Outcome, PageSource, Paginator};
pub use progress::{FetchProgress, ProgressCallback};
pub use rank::{RankedEntry, TopRankMode, rank, rank_contributors};
pub use report::{Report, ReportKind};
pub use tally::{AuthorTally, Contribution, Tally};
