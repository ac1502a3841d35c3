//! GitHub API client for repository activity listings.
//!
//! # Module Structure
//!
//! - [`error`] - Classification of GitHub responses into [`crate::ApiError`]
//! - [`types`] - Record and rate limit data structures
//! - [`client`] - The client and its listing operations
//! - [`pagination`] - `Link` header parsing
//! - [`convert`] - Attribution of records to authors
//!
//! ```ignore
//! use scrape::github::{ClientOptions, GitHubClient};
//!
//! let client = GitHubClient::new(&token, ClientOptions::default())?;
//! let page = client.list_commits("rust-lang", "rust", 1).await?;
//! ```

mod client;
mod convert;
mod error;
mod pagination;
mod types;

pub use client::{ClientOptions, DEFAULT_API_URL, DEFAULT_TIMEOUT, GitHubClient};
pub use error::{error_from_response, is_rate_limit_response, rate_limit_reset};
pub use pagination::next_page_from_link;
pub use types::{
    CommitDetail, CommitRecord, ContributorStats, FIRST_PAGE, GitHubRateLimitResponse,
    GitHubRateLimits, GitSignature, PAGE_SIZE, Page, PrState, PullRequestRecord,
    RateLimitResource, SimpleUser,
};
