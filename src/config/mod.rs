use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::output::OutputFormat;

const ENV_PREFIX: &str = "GITSHARE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub share: ShareConfig,
    pub output: OutputConfig,
}

/// Backend endpoints and the identity attached to every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub app_name: String,
    pub github_base_url: String,
    pub scientific_base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Number of repositories shown in the repository chart.
    pub top_repositories: usize,
    pub weeks_per_year: u64,
    /// Year used for the yearly summaries. `None` means the current year.
    pub reference_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: OutputFormat,
    pub color_output: bool,
}

impl ApiConfig {
    /// Derive both facades from a single backend root, e.g. `http://localhost:4000`.
    pub fn from_api_url(api_url: &str) -> Self {
        let api_url = api_url.trim_end_matches('/');
        Self {
            github_base_url: format!("{}/api/github", api_url),
            scientific_base_url: format!("{}/api/scientific", api_url),
            ..Self::default()
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            app_name: "gitshare".to_string(),
            github_base_url: "http://localhost:4000/api/github".to_string(),
            scientific_base_url: "http://localhost:4000/api/scientific".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            top_repositories: 10,
            weeks_per_year: 52,
            reference_year: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Html,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            share: ShareConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Layer defaults, an optional config file and `GITSHARE_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder().add_source(
            config::Config::try_from(&Self::default()).context("Failed to encode default config")?,
        );

        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to build configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn derives_both_facades_from_api_root() {
        let api = ApiConfig::from_api_url("https://example.org/");
        assert_eq!(api.github_base_url, "https://example.org/api/github");
        assert_eq!(api.scientific_base_url, "https://example.org/api/scientific");
        assert_eq!(api.app_name, "gitshare");
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\napp_name = \"card-test\"\n\n[share]\ntop_repositories = 5\nreference_year = 2016"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.api.app_name, "card-test");
        assert_eq!(config.share.top_repositories, 5);
        assert_eq!(config.share.reference_year, Some(2016));
        assert_eq!(config.share.weeks_per_year, 52);
        assert_eq!(config.output.default_format, OutputFormat::Html);
    }

    #[test]
    fn output_format_is_read_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[output]\ndefault_format = \"json\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.output.default_format, OutputFormat::Json);
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[output]\ndefault_format = \"pdf\"").unwrap();

        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/gitshare.toml"))).is_err());
    }
}
