//! Application configuration module
//!
//! `AppConfig` holds the values that can come from `config.toml`. The
//! runtime [`crate::egui_app::Config`] layers environment overrides on top.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default API base URL
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Default training input consumed by `/api/healthcare-gan/train`
pub const DEFAULT_TIME_SERIES_PATH: &str = "cleaned_merged_data.csv";
pub const DEFAULT_TABULAR_PATH: &str = "cleaned_tabular_data.csv";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// API base URL, without a trailing slash
    pub server_url: String,
    /// Where the session file lives; `None` means the platform config dir
    pub session_file: Option<PathBuf>,
    pub time_series_path: String,
    pub tabular_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            session_file: None,
            time_series_path: DEFAULT_TIME_SERIES_PATH.to_string(),
            tabular_path: DEFAULT_TABULAR_PATH.to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url(&self.server_url)?;
        if self.time_series_path.trim().is_empty() {
            return Err(ConfigError::MissingValue("time_series_path"));
        }
        if self.tabular_path.trim().is_empty() {
            return Err(ConfigError::MissingValue("tabular_path"));
        }
        Ok(())
    }
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    let parsed = reqwest::Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ConfigError::InvalidUrl(url.to_string())),
    }
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub session_file: Option<PathBuf>,
    pub time_series_path: Option<String>,
    pub tabular_path: Option<String>,
}

impl FileConfig {
    /// Parse a TOML document
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read a config file; a missing file yields the empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io(e.to_string())),
        }
    }

    /// Default location: `<config_dir>/synthesis/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("synthesis").join("config.toml"))
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    session_file: Option<PathBuf>,
    time_series_path: Option<String>,
    tabular_path: Option<String>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn time_series_path(mut self, path: impl Into<String>) -> Self {
        self.time_series_path = Some(path.into());
        self
    }

    pub fn tabular_path(mut self, path: impl Into<String>) -> Self {
        self.tabular_path = Some(path.into());
        self
    }

    /// Apply values from a config file; values already set on the builder win.
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        self.server_url = self.server_url.or(file.server_url);
        self.session_file = self.session_file.or(file.session_file);
        self.time_series_path = self.time_series_path.or(file.time_series_path);
        self.tabular_path = self.tabular_path.or(file.tabular_path);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_url: self
                .server_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.server_url),
            session_file: self.session_file,
            time_series_path: self.time_series_path.unwrap_or(defaults.time_series_path),
            tabular_path: self.tabular_path.unwrap_or(defaults.tabular_path),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to parse config file: {0}")]
    Parse(String),
    #[error("failed to read config file: {0}")]
    Io(String),
}
