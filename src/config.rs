//! Configuration management for graphdesk
//!
//! This module handles loading, parsing, validation and saving of the
//! configuration file that stores the server connection and onboarding state.

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_SERVER_URL,
    DEFAULT_STARTUP_TIMEOUT_SECONDS, DEFAULT_TOAST_SECONDS, ENV_API_KEY, ENV_SERVER_URL,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub onboarding: OnboardingConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Connection and credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the server, e.g. "https://graph.example.com"
    pub url: String,
    /// API key; empty when the user never logged in
    pub api_key: String,
    pub username: String,
}

/// Onboarding state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OnboardingConfig {
    /// Open the quickstart tour at the next launch
    pub quickstart_pending: bool,
}

/// UI timing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Seconds a toast stays on screen
    pub toast_seconds: u64,
    /// Timeout applied to every startup probe
    pub startup_timeout_seconds: u64,
    /// HTTP request timeout for ordinary backend calls
    pub request_timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to the log file
    pub enabled: bool,
    /// One of "error", "warn", "info", "debug", "trace"
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            api_key: String::new(),
            username: String::new(),
        }
    }
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            quickstart_pending: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_seconds: DEFAULT_TOAST_SECONDS,
            startup_timeout_seconds: DEFAULT_STARTUP_TIMEOUT_SECONDS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl UiConfig {
    pub fn toast_delay(&self) -> Duration {
        Duration::from_secs(self.toast_seconds)
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Config {
    /// Load configuration from file (or defaults) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file()? {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Write the configuration, creating parent directories as needed
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
            }
        }

        std::fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        let xdg_config = Self::get_default_config_path()?;
        if xdg_config.exists() {
            return Ok(Some(xdg_config));
        }

        Ok(None)
    }

    /// Path the configuration is written back to
    pub fn resolve_save_path() -> Result<PathBuf> {
        Ok(Self::find_config_file()?.unwrap_or(Self::get_default_config_path()?))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.is_empty() {
                self.server.api_key = key;
            }
        }
        if let Ok(url) = std::env::var(ENV_SERVER_URL) {
            if !url.is_empty() {
                self.server.url = url;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let url = self.server.url.trim();
        if url.is_empty() {
            anyhow::bail!("server.url cannot be empty");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("server.url must start with http:// or https://, got '{}'", url);
        }

        if self.ui.toast_seconds == 0 || self.ui.toast_seconds > 60 {
            anyhow::bail!("toast_seconds must be between 1 and 60, got {}", self.ui.toast_seconds);
        }
        if self.ui.startup_timeout_seconds == 0 || self.ui.startup_timeout_seconds > 30 {
            anyhow::bail!(
                "startup_timeout_seconds must be between 1 and 30, got {}",
                self.ui.startup_timeout_seconds
            );
        }
        if self.ui.request_timeout_seconds == 0 {
            anyhow::bail!("request_timeout_seconds must be positive");
        }

        if crate::logger::parse_level(&self.logging.level).is_none() {
            anyhow::bail!("Invalid logging level '{}'", self.logging.level);
        }

        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        !self.server.api_key.trim().is_empty()
    }

    /// Clear the quickstart flag in the file at `path`, keeping every other value
    pub fn mark_quickstart_complete<P: AsRef<Path>>(path: P) -> Result<()> {
        let mut config = if path.as_ref().exists() {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };
        config.onboarding.quickstart_pending = false;
        config.save_to_file(&path)
    }

    /// Store a fresh API key in the file at `path`
    pub fn store_api_key<P: AsRef<Path>>(path: P, username: &str, api_key: &str) -> Result<()> {
        let mut config = if path.as_ref().exists() {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };
        config.server.username = username.to_string();
        config.server.api_key = api_key.to_string();
        config.save_to_file(&path)
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        Self::default().save_to_file(&path)?;
        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
