use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_FIXTURES_PATH, DEFAULT_RESULTS_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    FIXTURES_PATH_ENV, FIXTURES_URL_ENV, RESULTS_PATH_ENV, RESULTS_URL_ENV, TIMEOUT_SECS_ENV,
};
use crate::error::{Result, ScraperError};

/// Everything a run needs, resolved from defaults, an optional TOML file,
/// the environment and command-line flags (in that order of precedence).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fixtures_url: Option<String>,
    pub results_url: Option<String>,
    pub fixtures_path: PathBuf,
    pub results_path: PathBuf,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixtures_url: None,
            results_url: None,
            fixtures_path: PathBuf::from(DEFAULT_FIXTURES_PATH),
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_dir: None,
        }
    }
}

/// Values given on the command line; `None` leaves the lower layer untouched.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub fixtures_url: Option<String>,
    pub results_url: Option<String>,
    pub fixtures_path: Option<PathBuf>,
    pub results_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Loads the optional TOML file, then layers the process environment on top.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config.normalized())
    }

    /// Applies environment values obtained through `lookup`; blank values are ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_blank(lookup(key));

        if let Some(url) = get(FIXTURES_URL_ENV) {
            self.fixtures_url = Some(url);
        }
        if let Some(url) = get(RESULTS_URL_ENV) {
            self.results_url = Some(url);
        }
        if let Some(path) = get(FIXTURES_PATH_ENV) {
            self.fixtures_path = PathBuf::from(path);
        }
        if let Some(path) = get(RESULTS_PATH_ENV) {
            self.results_path = PathBuf::from(path);
        }
        if let Some(secs) = get(TIMEOUT_SECS_ENV) {
            self.timeout_secs = secs.parse().map_err(|e| {
                ScraperError::Config(format!("{} must be a whole number of seconds: {}", TIMEOUT_SECS_ENV, e))
            })?;
        }
        Ok(self.normalized())
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.fixtures_url {
            self.fixtures_url = Some(url);
        }
        if let Some(url) = overrides.results_url {
            self.results_url = Some(url);
        }
        if let Some(path) = overrides.fixtures_path {
            self.fixtures_path = path;
        }
        if let Some(path) = overrides.results_path {
            self.results_path = path;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        self.normalized()
    }

    /// True when at least one listing URL is configured.
    pub fn has_work(&self) -> bool {
        self.fixtures_url.is_some() || self.results_url.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn normalized(mut self) -> Self {
        self.fixtures_url = non_blank(self.fixtures_url);
        self.results_url = non_blank(self.results_url);
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
