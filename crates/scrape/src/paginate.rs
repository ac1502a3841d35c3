//! Drives a paged listing to exhaustion, folding every record into a [`Tally`].
//!
//! A rate limit ends pagination early but keeps everything folded so far;
//! any other error is returned to the caller and no tally survives.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{self, ErrorClass};
use crate::github::{FIRST_PAGE, Page};
use crate::progress::{FetchProgress, ProgressCallback, emit};
use crate::tally::{Contribution, Tally};

/// Something that can return page N of a listing.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Record: Contribution + Send;

    async fn fetch_page(&self, page: u32) -> error::Result<Page<Self::Record>>;
}

/// How pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Every page was read.
    Complete,
    /// The service signalled its rate limit; results are partial.
    RateLimited { reset_at: Option<DateTime<Utc>> },
    /// The cancel flag was raised between requests.
    Interrupted,
}

impl Outcome {
    pub fn is_partial(&self) -> bool {
        !matches!(self, Outcome::Complete)
    }
}

/// Result of a pagination run.
#[derive(Debug)]
pub struct Collected {
    pub tally: Tally,
    pub outcome: Outcome,
    /// Pages successfully fetched and folded.
    pub pages_fetched: u32,
    /// Records folded across all pages.
    pub records: usize,
}

/// Sequential paginator over a [`PageSource`].
pub struct Paginator<'a, S: PageSource + ?Sized> {
    source: &'a S,
    on_progress: Option<&'a ProgressCallback>,
    cancel: Option<&'a AtomicBool>,
}

impl<'a, S: PageSource + ?Sized> Paginator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            on_progress: None,
            cancel: None,
        }
    }

    /// Report progress events through `callback`.
    pub fn on_progress(mut self, callback: Option<&'a ProgressCallback>) -> Self {
        self.on_progress = callback;
        self
    }

    /// Stop before the next request once `flag` is set.
    pub fn cancel_flag(mut self, flag: Option<&'a AtomicBool>) -> Self {
        self.cancel = flag;
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.is_some_and(|f| f.load(Ordering::Acquire))
    }

    /// Fetch pages until the listing is exhausted, rate limited or cancelled.
    pub async fn collect(self) -> error::Result<Collected> {
        let mut tally = Tally::new();
        let mut page = FIRST_PAGE;
        let mut pages_fetched = 0u32;
        let mut records = 0usize;

        let outcome = loop {
            if self.cancelled() {
                tracing::debug!(page, "Pagination cancelled");
                emit(self.on_progress, FetchProgress::Interrupted { page });
                break Outcome::Interrupted;
            }

            emit(self.on_progress, FetchProgress::FetchingPage { page });

            let fetched = match self.source.fetch_page(page).await {
                Ok(fetched) => fetched,
                Err(err) => match err.class() {
                    ErrorClass::RateLimited => {
                        let reset_at = err.reset_at();
                        tracing::warn!(page, reset_at = ?reset_at, "hit rate limit");
                        emit(
                            self.on_progress,
                            FetchProgress::RateLimited { page, reset_at },
                        );
                        break Outcome::RateLimited { reset_at };
                    }
                    ErrorClass::Other => return Err(err),
                },
            };

            tally.fold_all(&fetched.items);
            pages_fetched += 1;
            records += fetched.items.len();

            emit(
                self.on_progress,
                FetchProgress::FetchedPage {
                    page,
                    count: fetched.items.len(),
                    total_so_far: records,
                    next_page: fetched.next_page,
                },
            );

            if !fetched.has_next() {
                break Outcome::Complete;
            }
            if fetched.next_page <= page {
                // A next link pointing backwards would loop forever.
                tracing::warn!(
                    page,
                    next_page = fetched.next_page,
                    "Next page does not advance, stopping"
                );
                break Outcome::Complete;
            }
            page = fetched.next_page;
        };

        if outcome == Outcome::Complete {
            emit(
                self.on_progress,
                FetchProgress::Complete {
                    pages: pages_fetched,
                    records,
                },
            );
        }

        Ok(Collected {
            tally,
            outcome,
            pages_fetched,
            records,
        })
    }
}

/// Shorthand for `Paginator::new(source).collect()`.
pub async fn collect<S: PageSource + ?Sized>(source: &S) -> error::Result<Collected> {
    Paginator::new(source).collect().await
}
