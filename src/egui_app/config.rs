use std::path::PathBuf;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, FileConfig};

/// Application configuration wrapper.
///
/// Resolution order: environment, then `config.toml`, then built-in defaults.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Invalid configuration, falling back to defaults: {}", e);
            Self {
                app: AppConfig::default(),
            }
        })
    }
}

impl Config {
    /// Create a new configuration from the environment and config file
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `SYNTHESIS_*` variables and the optional config file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();

        if let Ok(url) = std::env::var("SYNTHESIS_API_URL") {
            builder = builder.server_url(url);
        }
        if let Ok(path) = std::env::var("SYNTHESIS_SESSION_FILE") {
            builder = builder.session_file(path);
        }
        if let Ok(path) = std::env::var("SYNTHESIS_TIME_SERIES_PATH") {
            builder = builder.time_series_path(path);
        }
        if let Ok(path) = std::env::var("SYNTHESIS_TABULAR_PATH") {
            builder = builder.tabular_path(path);
        }

        if let Some(path) = FileConfig::default_path() {
            builder = builder.merge_file(FileConfig::load(&path)?);
        }

        Self::with_builder(builder)
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.server_url(), path)
        } else {
            format!("{}/{}", self.server_url(), path)
        }
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    /// Session file location, defaulting to `<config_dir>/synthesis/session.json`
    pub fn session_file(&self) -> Option<PathBuf> {
        self.app
            .session_file
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join("synthesis").join("session.json")))
    }

    pub fn time_series_path(&self) -> &str {
        &self.app.time_series_path
    }

    pub fn tabular_path(&self) -> &str {
        &self.app.tabular_path
    }
}
