//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::fetch::ClientConfig;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "SSC_API_URL";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
            ..Default::default()
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Thresholds below which a view shows nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Head-to-head matches needed before a rivalry is listed
    #[serde(default = "default_min_rivalry_matches")]
    pub min_rivalry_matches: u32,

    /// Matches played needed to appear in the form table
    #[serde(default = "default_min_form_matches")]
    pub min_form_matches: u32,

    /// Matches needed before the frequency view is shown
    #[serde(default = "default_min_frequency_matches")]
    pub min_frequency_matches: usize,

    /// Players needed before the radar is shown
    #[serde(default = "default_min_radar_players")]
    pub min_radar_players: usize,

    /// Rating history rows in the ELO trend
    #[serde(default = "default_recent_elo_window")]
    pub recent_elo_window: usize,
}

fn default_min_rivalry_matches() -> u32 {
    crate::calculate::DEFAULT_MIN_RIVALRY_MATCHES
}

fn default_min_form_matches() -> u32 {
    crate::calculate::FORM_WINDOW as u32
}

fn default_min_frequency_matches() -> usize {
    10
}

fn default_min_radar_players() -> usize {
    2
}

fn default_recent_elo_window() -> usize {
    15
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            min_rivalry_matches: default_min_rivalry_matches(),
            min_form_matches: default_min_form_matches(),
            min_frequency_matches: default_min_frequency_matches(),
            min_radar_players: default_min_radar_players(),
            recent_elo_window: default_recent_elo_window(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Alternative roster file; the bundled roster is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roster_path: Option<PathBuf>,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            roster_path: None,
            api: ApiConfig::default(),
            server: ServerConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_url(std::env::var(API_URL_ENV).ok())
    }

    /// Replace the backend URL when `url` is set and non-empty.
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "API timeout must be greater than 0".to_string(),
            ));
        }

        if url::Url::parse(&self.api.base_url).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "API base URL is not a valid URL: {}",
                self.api.base_url
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.display.recent_elo_window == 0 {
            return Err(ConfigError::ValidationError(
                "ELO trend window must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
