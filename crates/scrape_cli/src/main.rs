//! Scrape CLI - ranked activity reports for a GitHub repository.

mod commands;
mod config;
mod progress;
mod shutdown;
mod target;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use scrape::{ApiError, GitHubClient, PrState, ReportError, short_error_message};
use tracing_subscriber::EnvFilter;

use crate::commands::OutputFormat;
use crate::commands::report::ReportCommand;
use crate::config::Config;
use crate::target::RepoTarget;

/// A fatal API error; nothing was reported.
pub(crate) const EXIT_FATAL: u8 = 1;
/// `SCRAPE_TOKEN` is not set.
pub(crate) const EXIT_NO_TOKEN: u8 = 3;
/// The `<org>/<repo>` argument is missing or malformed.
pub(crate) const EXIT_BAD_TARGET: u8 = 4;
/// A configuration value could not be parsed.
pub(crate) const EXIT_CONFIG: u8 = 5;
/// Cancelled with Ctrl+C.
pub(crate) const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(name = "scrape")]
#[command(version)]
#[command(about = "Ranked commit, pull request and contributor reports for a GitHub repository")]
#[command(after_long_help = r#"EXAMPLES
    Rank everyone who committed to a repository:
        $ scrape commits dmmcquay/sqrl

    Rank authors of closed pull requests, as JSON:
        $ scrape closedprs rust-lang/rust --output json

    Check the remaining API quota:
        $ scrape apirates

CONFIGURATION
    Scrape reads configuration from:
      1. ~/.config/scrape/config.toml (or $XDG_CONFIG_HOME/scrape/config.toml)
      2. ./scrape.toml
      3. Environment variables (SCRAPE_* prefix, e.g., SCRAPE_TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    SCRAPE_TOKEN              GitHub personal access token (required)
    SCRAPE_API_URL            API base URL (default: https://api.github.com)
    SCRAPE_TIMEOUT_SECS       Per-request timeout in seconds (default: 30)
    SCRAPE_LEGACY_TOP_RANK    Number top100 rows as 100 - position
    RUST_LOG                  Log filter (default: scrape=info,scrape_cli=info)

EXIT STATUS
    0 success, 1 API error, 2 usage error, 3 missing token,
    4 missing or malformed org/repo, 5 invalid configuration, 130 interrupted
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Per-request timeout in seconds (default from config or 30)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// API base URL (default from config or https://api.github.com)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// See the top 100 committers to a project
    #[command(name = "top100")]
    Top100 {
        /// Repository as <org>/<repo>
        target: Option<String>,

        /// Number rows 100 - position instead of counting down to 1
        #[arg(long)]
        legacy_rank: bool,
    },
    /// See all users' commits to a project
    #[command(name = "commits")]
    Commits {
        /// Repository as <org>/<repo>
        target: Option<String>,
    },
    /// See current used API requests/total
    #[command(name = "apirates")]
    Apirates {
        /// Accepted for compatibility and ignored
        #[arg(hide = true)]
        #[allow(dead_code)]
        target: Option<String>,

        /// Show every rate limit resource, not just the core API
        #[arg(long)]
        all: bool,
    },
    /// See all open PRs to a project
    #[command(name = "openprs")]
    Openprs {
        /// Repository as <org>/<repo>
        target: Option<String>,
    },
    /// See all closed PRs to a project
    #[command(name = "closedprs")]
    Closedprs {
        /// Repository as <org>/<repo>
        target: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("scrape=debug,scrape_cli=debug"),
        Err(_) => EnvFilter::new("scrape=info,scrape_cli=info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse the `<org>/<repo>` argument of a report command.
fn parse_target(raw: Option<&str>) -> Result<RepoTarget, ExitCode> {
    let Some(raw) = raw else {
        eprintln!("usage: scrape <command> <org>/<repo>");
        return Err(ExitCode::from(EXIT_BAD_TARGET));
    };
    raw.parse().map_err(|e| {
        eprintln!("{}", e);
        ExitCode::from(EXIT_BAD_TARGET)
    })
}

/// Build the client, or explain what configuration is missing.
fn build_client(cli: &Cli, config: &Config) -> Result<GitHubClient, ExitCode> {
    let Some(token) = config.token() else {
        eprintln!("scrape requires SCRAPE_TOKEN env variable to be defined with valid access token");
        return Err(ExitCode::from(EXIT_NO_TOKEN));
    };

    let options = config.client_options(cli.api_url.as_deref(), cli.timeout);
    GitHubClient::new(token, options).map_err(|e| {
        eprintln!("Error: {}", short_error_message(&e));
        ExitCode::from(EXIT_FATAL)
    })
}

fn exit_code_for(err: &ReportError) -> ExitCode {
    match err {
        ReportError::Interrupted => ExitCode::from(EXIT_INTERRUPTED),
        _ => ExitCode::from(EXIT_FATAL),
    }
}

async fn run(cli: Cli, config: Config) -> Result<(), ExitCode> {
    let (command, target) = match &cli.command {
        Commands::Completions { shell } => {
            return commands::meta::handle_completions(*shell).map_err(|e| {
                eprintln!("Error: {}", e);
                exit_code_for(&e)
            });
        }
        Commands::Man { output } => {
            return commands::meta::handle_man(output.as_deref()).map_err(|e| {
                eprintln!("Error: {}", e);
                exit_code_for(&e)
            });
        }
        Commands::Apirates { all, .. } => {
            let client = build_client(&cli, &config)?;
            return commands::limits::handle_apirates(&client, *all, cli.output)
                .await
                .map_err(|e| {
                    tracing::error!("error getting rate: {}", short_error_message(&e));
                    exit_code_for(&e)
                });
        }
        Commands::Commits { target } => (ReportCommand::Commits, target),
        Commands::Openprs { target } => (ReportCommand::PullRequests(PrState::Open), target),
        Commands::Closedprs { target } => (ReportCommand::PullRequests(PrState::Closed), target),
        Commands::Top100 {
            target,
            legacy_rank,
        } => (
            ReportCommand::TopContributors(config.top_rank_mode(*legacy_rank)),
            target,
        ),
    };

    let target = parse_target(target.as_deref())?;
    let client = build_client(&cli, &config)?;

    shutdown::setup_shutdown_handler();

    commands::report::handle_report(command, &target, &client, cli.output)
        .await
        .map_err(|e| {
            match &e {
                ReportError::Interrupted => tracing::warn!("Interrupted, no report written"),
                ReportError::Fatal(ApiError::RateLimited { .. }) => {
                    tracing::error!("hit rate limit: {}", short_error_message(&e))
                }
                _ => tracing::error!("{}", short_error_message(&e)),
            }
            exit_code_for(&e)
        })
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Usage errors exit with status 2 from here
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load configuration (config file -> env vars -> defaults)
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_commands_with_target() {
        let cli = Cli::try_parse_from(["scrape", "top100", "dmmcquay/sqrl", "--legacy-rank"])
            .expect("valid args");
        assert!(matches!(
            cli.command,
            Commands::Top100 { ref target, legacy_rank: true } if target.as_deref() == Some("dmmcquay/sqrl")
        ));

        let cli = Cli::try_parse_from(["scrape", "closedprs", "o/r", "-o", "json"]).unwrap();
        assert!(matches!(cli.command, Commands::Closedprs { .. }));
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn apirates_accepts_optional_target() {
        assert!(Cli::try_parse_from(["scrape", "apirates"]).is_ok());
        assert!(Cli::try_parse_from(["scrape", "apirates", "o/r"]).is_ok());
    }

    #[test]
    fn unknown_command_is_a_usage_error() {
        let err = Cli::try_parse_from(["scrape", "stars", "o/r"])
            .err()
            .expect("unknown command");
        assert_eq!(err.exit_code(), 2);

        let err = Cli::try_parse_from(["scrape"]).err().expect("missing command");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn global_flags_follow_the_command() {
        let cli =
            Cli::try_parse_from(["scrape", "commits", "o/r", "--timeout", "5", "-v"]).unwrap();
        assert_eq!(cli.timeout, Some(5));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_target_maps_errors_to_exit_code() {
        assert!(parse_target(Some("o/r")).is_ok());
        assert_eq!(
            parse_target(Some("nope")).unwrap_err(),
            ExitCode::from(EXIT_BAD_TARGET)
        );
        assert_eq!(
            parse_target(None).unwrap_err(),
            ExitCode::from(EXIT_BAD_TARGET)
        );
    }

    #[test]
    fn missing_token_exits_with_three() {
        let cli = Cli::try_parse_from(["scrape", "commits", "o/r"]).unwrap();
        let config = Config::default();
        assert_eq!(
            build_client(&cli, &config).err(),
            Some(ExitCode::from(EXIT_NO_TOKEN))
        );
    }

    #[test]
    fn interrupted_exits_with_130() {
        assert_eq!(
            exit_code_for(&ReportError::Interrupted),
            ExitCode::from(EXIT_INTERRUPTED)
        );
        assert_eq!(
            exit_code_for(&ReportError::Fatal(ApiError::AuthRequired)),
            ExitCode::from(EXIT_FATAL)
        );
    }
}
