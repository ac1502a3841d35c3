//! Configuration file support for scrape.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `SCRAPE_`, e.g., `SCRAPE_TOKEN`)
//! 3. Config file (./scrape.toml, then ~/.config/scrape/config.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! token = "ghp_..."  # or use SCRAPE_TOKEN env var
//! api_url = "https://api.github.com"
//! timeout_secs = 30
//! legacy_top_rank = false
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config as ConfigBuilder, ConfigBuilder as Builder, Environment, File, FileFormat};
use directories::ProjectDirs;
use scrape::github::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use scrape::{ClientOptions, TopRankMode};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub API token.
    /// Can also be set via SCRAPE_TOKEN environment variable.
    pub token: Option<String>,
    /// API base URL, for GitHub Enterprise hosts.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Number top contributors `100 - position` instead of `N - position`.
    pub legacy_top_rank: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            legacy_top_rank: false,
        }
    }
}

/// `SCRAPE_` environment variables; `__` separates nested keys so that
/// `SCRAPE_TIMEOUT_SECS` maps to `timeout_secs`.
fn environment() -> Environment {
    Environment::with_prefix("SCRAPE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/scrape/config.toml)
    /// 3. Local config file (./scrape.toml)
    /// 4. Environment variables with SCRAPE_ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("scrape.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./scrape.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        Self::from_builder(builder.add_source(environment()))
    }

    /// Build and deserialize. A malformed value is an error naming the key.
    fn from_builder(
        builder: Builder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize()
    }

    /// The token, unless it is missing or blank.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Client settings, with CLI flags taking precedence.
    pub fn client_options(&self, api_url: Option<&str>, timeout_secs: Option<u64>) -> ClientOptions {
        ClientOptions {
            api_url: api_url.unwrap_or(&self.api_url).to_string(),
            timeout: Duration::from_secs(timeout_secs.unwrap_or(self.timeout_secs)),
        }
    }

    /// Top contributor numbering, with `--legacy-rank` taking precedence.
    pub fn top_rank_mode(&self, legacy_flag: bool) -> TopRankMode {
        if legacy_flag || self.legacy_top_rank {
            TopRankMode::Legacy
        } else {
            TopRankMode::Positional
        }
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "scrape").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.token.is_none());
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.legacy_top_rank);
    }

    #[test]
    fn test_config_builder_with_toml_string() {
        let toml_content = r#"
            token = "ghp_test123"
            api_url = "https://ghe.example.com/api/v3"
            timeout_secs = 5
            legacy_top_rank = true
        "#;

        let config = Config::from_builder(
            ConfigBuilder::builder().add_source(File::from_str(toml_content, FileFormat::Toml)),
        )
        .expect("valid config");

        assert_eq!(config.token(), Some("ghp_test123"));
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.legacy_top_rank);
    }

    #[test]
    fn test_config_builder_partial_override() {
        let config = Config::from_builder(
            ConfigBuilder::builder()
                .add_source(File::from_str("timeout_secs = 90", FileFormat::Toml)),
        )
        .expect("valid config");

        assert_eq!(config.timeout_secs, 90);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_environment_overrides_file() {
        let config = Config::from_builder(
            ConfigBuilder::builder()
                .add_source(File::from_str(
                    "token = \"from-file\"\ntimeout_secs = 5",
                    FileFormat::Toml,
                ))
                .add_source(env(&[
                    ("SCRAPE_TOKEN", "from-env"),
                    ("SCRAPE_TIMEOUT_SECS", "12"),
                ])),
        )
        .expect("valid config");

        assert_eq!(config.token(), Some("from-env"));
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn test_unrelated_environment_is_ignored() {
        let config = Config::from_builder(
            ConfigBuilder::builder().add_source(env(&[("GITHUB_TOKEN", "nope")])),
        )
        .expect("valid config");
        assert!(config.token().is_none());
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let config = Config {
            token: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(config.token().is_none());
    }

    #[test]
    fn test_invalid_file_value_is_an_error() {
        let err = Config::from_builder(
            ConfigBuilder::builder()
                .add_source(File::from_str("timeout_secs = \"soon\"", FileFormat::Toml)),
        )
        .expect_err("non-numeric timeout");
        assert!(err.to_string().contains("timeout_secs"), "{err}");
    }

    #[test]
    fn test_invalid_env_value_does_not_masquerade_as_missing_token() {
        let result = Config::from_builder(ConfigBuilder::builder().add_source(env(&[
            ("SCRAPE_TOKEN", "ghp_real"),
            ("SCRAPE_TIMEOUT_SECS", "soon"),
        ])));

        let err = result.expect_err("bad timeout must surface");
        assert!(err.to_string().contains("timeout_secs"), "{err}");
    }

    #[test]
    fn test_client_options_prefer_flags() {
        let config = Config::default();

        let options = config.client_options(None, None);
        assert_eq!(options.api_url, DEFAULT_API_URL);
        assert_eq!(options.timeout, Duration::from_secs(30));

        let options = config.client_options(Some("http://localhost:8080"), Some(3));
        assert_eq!(options.api_url, "http://localhost:8080");
        assert_eq!(options.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_top_rank_mode() {
        let config = Config::default();
        assert_eq!(config.top_rank_mode(false), TopRankMode::Positional);
        assert_eq!(config.top_rank_mode(true), TopRankMode::Legacy);

        let config = Config {
            legacy_top_rank: true,
            ..Config::default()
        };
        assert_eq!(config.top_rank_mode(false), TopRankMode::Legacy);
    }
}
