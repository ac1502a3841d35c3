//! Progress reporting for paginated reports.
//!
//! This module provides two modes of progress reporting:
//! - Interactive mode (TTY): an indicatif spinner counting records per page
//! - Logging mode (non-TTY): structured logging using tracing
//!
//! Both write to stderr, so stdout carries only the report.

mod interactive;
mod logging;

use std::sync::Arc;

use console::Term;
use scrape::{FetchProgress, ProgressCallback};

pub use interactive::InteractiveReporter;
pub use logging::LoggingReporter;

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Interactive spinner for TTY.
    Interactive(InteractiveReporter),
    /// Structured logging for non-TTY (CI, pipes).
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub fn new(label: &str) -> Self {
        if Term::stderr().is_term() {
            Self::Interactive(InteractiveReporter::new(label))
        } else {
            Self::Logging(LoggingReporter::new(label))
        }
    }

    /// Handle a progress event.
    pub fn handle(&self, event: FetchProgress) {
        match self {
            Self::Interactive(r) => r.handle(event),
            Self::Logging(r) => r.handle(event),
        }
    }

    /// Convert to a ProgressCallback for the library.
    pub fn as_callback(self: &Arc<Self>) -> ProgressCallback {
        let reporter = Arc::clone(self);
        Box::new(move |event| {
            reporter.handle(event);
        })
    }

    /// Remove the spinner before the report is printed (interactive mode only).
    pub fn finish(&self) {
        if let Self::Interactive(r) = self {
            r.finish();
        }
    }
}
