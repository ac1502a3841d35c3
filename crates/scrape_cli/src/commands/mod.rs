use clap::ValueEnum;

pub(crate) mod limits;
pub(crate) mod meta;
pub(crate) mod report;

/// Output format for reports and rate limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Tab-aligned text (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}
