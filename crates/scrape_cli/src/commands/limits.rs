use chrono::{DateTime, Utc};
use scrape::github::{GitHubRateLimits, RateLimitResource};
use scrape::{GitHubClient, RateStatus, ReportError, rate_status};

use crate::commands::OutputFormat;

/// Handle the `apirates` command.
///
/// Prints `<remaining>/<limit> requests` for the core API, or a table of
/// every resource with `--all`.
pub(crate) async fn handle_apirates(
    client: &GitHubClient,
    all: bool,
    output: OutputFormat,
) -> Result<(), ReportError> {
    let rendered = if all {
        let limits = client.get_rate_limit().await?;
        render_quota_table(quota_rows(&limits.resources, Utc::now()), output)?
    } else {
        render_status(&rate_status(client).await?, output)?
    };
    println!("{rendered}");
    Ok(())
}

fn render_status(status: &RateStatus, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(status.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(status),
    }
}

/// One row of `apirates --all`.
#[derive(Debug, Clone, serde::Serialize, tabled::Tabled)]
pub(crate) struct QuotaRow {
    #[tabled(rename = "Resource")]
    pub resource: String,
    #[tabled(rename = "Remaining")]
    pub remaining: usize,
    #[tabled(rename = "Limit")]
    pub limit: usize,
    #[tabled(rename = "Used")]
    pub used: usize,
    #[tabled(rename = "Used %")]
    pub used_percent: String,
    #[tabled(rename = "Resets")]
    pub resets: String,
}

impl QuotaRow {
    fn new(name: &str, resource: &RateLimitResource, now: DateTime<Utc>) -> Self {
        let used_percent = match resource.limit {
            0 => 0.0,
            limit => resource.used as f64 * 100.0 / limit as f64,
        };
        let reset_at = resource.reset_at();
        let remaining_secs = (reset_at - now).num_seconds();
        let resets = if remaining_secs > 0 {
            format!("{} (in {})", reset_at.format("%H:%M:%S UTC"), humanize_secs(remaining_secs))
        } else {
            "now".to_string()
        };

        Self {
            resource: name.to_string(),
            remaining: resource.remaining,
            limit: resource.limit,
            used: resource.used,
            used_percent: format!("{used_percent:.1}%"),
            resets,
        }
    }
}

/// Rows for every resource GitHub reported, sorted by name.
fn quota_rows(limits: &GitHubRateLimits, now: DateTime<Utc>) -> Vec<QuotaRow> {
    let mut rows: Vec<QuotaRow> = limits
        .named()
        .into_iter()
        .map(|(name, resource)| QuotaRow::new(name, resource, now))
        .collect();
    rows.sort_by(|a, b| a.resource.cmp(&b.resource));
    rows
}

fn render_quota_table(
    rows: Vec<QuotaRow>,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(tabled::Table::new(rows)
            .with(tabled::settings::Style::rounded())
            .to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(&rows),
    }
}

/// `42s`, `2m 5s`, `1h 5m`; zero-valued trailing units are dropped.
fn humanize_secs(secs: i64) -> String {
    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
    match (h, m, s) {
        (0, 0, s) => format!("{s}s"),
        (0, m, 0) => format!("{m}m"),
        (0, m, s) => format!("{m}m {s}s"),
        (h, 0, _) => format!("{h}h"),
        (h, m, _) => format!("{h}h {m}m"),
    }
}
