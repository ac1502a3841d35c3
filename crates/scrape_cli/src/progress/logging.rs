use scrape::FetchProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter {
    label: String,
}

impl LoggingReporter {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }

    pub fn handle(&self, event: FetchProgress) {
        let repository = self.label.as_str();
        match event {
            FetchProgress::FetchingPage { page } => {
                tracing::debug!(repository, page, "Fetching page");
            }

            FetchProgress::FetchedPage {
                page,
                count,
                total_so_far,
                next_page,
            } => {
                tracing::info!(repository, page, count, total_so_far, next_page, "Fetched page");
            }

            FetchProgress::RateLimited { page, reset_at } => {
                tracing::warn!(
                    repository,
                    page,
                    reset_at = ?reset_at,
                    "Rate limited, report is partial"
                );
            }

            FetchProgress::Interrupted { page } => {
                tracing::warn!(repository, page, "Interrupted before page");
            }

            FetchProgress::Complete { pages, records } => {
                tracing::info!(repository, pages, records, "Fetch complete");
            }

            _ => {}
        }
    }
}
