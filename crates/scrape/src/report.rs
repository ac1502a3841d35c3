//! Rendering of ranked entries as aligned text tables or JSON.

mod tabwriter;

pub use tabwriter::{MIN_CELL_WIDTH, TAB_WIDTH, TabWriter};

use std::io::Write;

use serde::Serialize;

use crate::error::ReportError;
use crate::github::PrState;
use crate::paginate::Outcome;
use crate::rank::RankedEntry;

/// Emails listed in full below this count; above it only first and last show.
const EMAIL_TRUNCATE_AT: usize = 3;

/// Which listing a report was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportKind {
    Commits,
    PullRequests { state: PrState },
    TopContributors,
}

impl ReportKind {
    fn header(&self) -> &'static [&'static str] {
        match self {
            Self::Commits => &["rank", "login", "emails", "commits"],
            Self::PullRequests { .. } => &["rank", "login", "PRs"],
            Self::TopContributors => &["rank", "login", "commits"],
        }
    }

    fn has_emails(&self) -> bool {
        matches!(self, Self::Commits)
    }
}

/// A finished, ranked report ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub kind: ReportKind,
    /// `org/repo` the report covers.
    pub repository: String,
    pub entries: Vec<RankedEntry>,
    /// Sum of every entry's count.
    pub total_count: u64,
    pub total_authors: usize,
    pub outcome: Outcome,
}

impl Report {
    pub fn from_ranked(
        kind: ReportKind,
        repository: impl Into<String>,
        entries: Vec<RankedEntry>,
        outcome: Outcome,
    ) -> Self {
        let total_count = entries.iter().map(|e| e.count).sum();
        let total_authors = entries.len();
        Self {
            kind,
            repository: repository.into(),
            entries,
            total_count,
            total_authors,
            outcome,
        }
    }

    /// True when pagination stopped before the last page.
    pub fn is_partial(&self) -> bool {
        self.outcome.is_partial()
    }

    fn summary_lines(&self) -> Vec<String> {
        match self.kind {
            ReportKind::Commits => vec![
                format!("TOTAL COMMITS: {}", self.total_count),
                format!("TOTAL AUTHORS: {}", self.total_authors),
            ],
            ReportKind::PullRequests { .. } => vec![
                format!("TOTAL PRs: {}", self.total_count),
                format!("TOTAL AUTHORS: {}", self.total_authors),
            ],
            ReportKind::TopContributors => {
                vec![format!("TOTAL TOP100 AUTHORS: {}", self.total_authors)]
            }
        }
    }
}

/// Format an email list as `[a b]`, or `[first [...] last]` once there are
/// three or more.
pub fn format_emails(emails: &[String]) -> String {
    match emails {
        [first, .., last] if emails.len() >= EMAIL_TRUNCATE_AT => {
            format!("[{first} [...] {last}]")
        }
        _ => format!("[{}]", emails.join(" ")),
    }
}

/// Render the table, a blank line, then the summary totals.
pub fn render_text(report: &Report) -> String {
    let mut table = TabWriter::default();
    table.row(report.kind.header().iter().copied());

    for entry in &report.entries {
        let mut cells = vec![entry.rank.to_string(), entry.login.clone()];
        if report.kind.has_emails() {
            cells.push(format_emails(&entry.emails));
        }
        cells.push(entry.count.to_string());
        table.row(cells);
    }
    table.blank_line();

    let mut out = table.render();
    for line in report.summary_lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Write the rendered text report with a single write call.
pub fn write_text(report: &Report, mut out: impl Write) -> Result<(), ReportError> {
    out.write_all(render_text(report).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Pretty-printed JSON for the whole report.
pub fn render_json(report: &Report) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write the JSON report followed by a newline.
pub fn write_json(report: &Report, mut out: impl Write) -> Result<(), ReportError> {
    let mut json = render_json(report)?;
    json.push('\n');
    out.write_all(json.as_bytes())?;
    out.flush()?;
    Ok(())
}
