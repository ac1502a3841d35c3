//! Progress events emitted while a report pages through a listing.

use chrono::{DateTime, Utc};

/// Progress events emitted during pagination.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FetchProgress {
    /// About to request a page.
    FetchingPage {
        /// Page number (1-indexed).
        page: u32,
    },

    /// A page was fetched and folded into the tally.
    FetchedPage {
        /// Page number (1-indexed).
        page: u32,
        /// Number of records on this page.
        count: usize,
        /// Running total of records folded so far.
        total_so_far: usize,
        /// Page that will be requested next, 0 when done.
        next_page: u32,
    },

    /// The service refused further requests; the tally is partial.
    RateLimited {
        /// Page that was refused.
        page: u32,
        /// When the quota resets, if advertised.
        reset_at: Option<DateTime<Utc>>,
    },

    /// Pagination was cancelled before the next request.
    Interrupted {
        /// Page that would have been requested.
        page: u32,
    },

    /// All pages were read.
    Complete {
        /// Pages fetched.
        pages: u32,
        /// Records folded.
        records: usize,
    },
}

/// Callback type for pagination progress.
pub type ProgressCallback = Box<dyn Fn(FetchProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: FetchProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
