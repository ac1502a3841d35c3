use std::io::Write;
use std::sync::Arc;

use scrape::report::{Report, write_json, write_text};
use scrape::{
    DriverOptions, GitHubClient, Outcome, PrState, ReportError, TopRankMode, commits_report,
    pull_requests_report, top_contributors_report,
};

use crate::commands::OutputFormat;
use crate::progress::ProgressReporter;
use crate::shutdown::shutdown_flag;
use crate::target::RepoTarget;

/// Which ranked report to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportCommand {
    Commits,
    PullRequests(PrState),
    TopContributors(TopRankMode),
}

/// Handle `commits`, `openprs`, `closedprs` and `top100`.
pub(crate) async fn handle_report(
    command: ReportCommand,
    target: &RepoTarget,
    client: &GitHubClient,
    output: OutputFormat,
) -> Result<(), ReportError> {
    let (org, repo) = (target.org.as_str(), target.repo.as_str());

    let reporter = Arc::new(ProgressReporter::new(&target.to_string()));
    let callback = reporter.as_callback();
    let options = DriverOptions {
        on_progress: Some(&callback),
        cancel: Some(shutdown_flag()),
    };

    tracing::debug!(?command, repository = %target, "Building report");
    let result = match command {
        ReportCommand::Commits => commits_report(client, org, repo, options).await,
        ReportCommand::PullRequests(state) => {
            pull_requests_report(client, org, repo, state, options).await
        }
        ReportCommand::TopContributors(mode) => {
            top_contributors_report(client, org, repo, mode, options).await
        }
    };
    reporter.finish();

    let report = result?;
    if let Outcome::RateLimited { reset_at } = report.outcome {
        match reset_at {
            Some(at) => eprintln!("hit rate limit, report is partial (resets at {at})"),
            None => eprintln!("hit rate limit, report is partial"),
        }
    }

    write_report(&report, output, std::io::stdout().lock())
}

fn write_report(report: &Report, output: OutputFormat, out: impl Write) -> Result<(), ReportError> {
    match output {
        OutputFormat::Text => write_text(report, out),
        OutputFormat::Json => write_json(report, out),
    }
}
