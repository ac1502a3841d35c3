use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use scrape::FetchProgress;

/// Interactive progress reporter using indicatif.
pub struct InteractiveReporter {
    bar: ProgressBar,
}

impl InteractiveReporter {
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::counter_style());
        bar.set_prefix(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn handle(&self, event: FetchProgress) {
        match event {
            FetchProgress::FetchingPage { page } => {
                self.bar.set_message(format!("fetching page {}", page));
            }

            FetchProgress::FetchedPage { total_so_far, .. } => {
                self.bar.set_position(total_so_far as u64);
            }

            FetchProgress::RateLimited { page, .. } => {
                self.bar
                    .abandon_with_message(format!("rate limited at page {}", page));
            }

            FetchProgress::Interrupted { .. } => {
                self.bar.abandon_with_message("interrupted");
            }

            FetchProgress::Complete { pages, records } => {
                self.bar.set_position(records as u64);
                self.bar
                    .finish_with_message(format!("records from {} pages", pages));
            }

            _ => {}
        }
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }

    fn counter_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.green} {pos:>6} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    }
}
