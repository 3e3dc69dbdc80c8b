//! Configuration management for chatwidget
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ChatWidgetError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure for chatwidget
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chatbot server connection settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Presentation settings for the terminal surface
    #[serde(default)]
    pub ui: UiConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chatbot server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL the endpoint paths are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Overall per-request timeout (seconds). Requests are never retried.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Sender label for messages typed by the user
    #[serde(default = "default_user_label")]
    pub user_label: String,

    /// Sender label for messages produced by the server
    #[serde(default = "default_bot_label")]
    pub bot_label: String,

    /// Emit ANSI colors on the terminal surface
    #[serde(default = "default_color")]
    pub color: bool,

    /// How often the prompt clock refreshes (seconds)
    #[serde(default = "default_clock_interval")]
    pub clock_interval_seconds: u64,
}

fn default_user_label() -> String {
    "You".to_string()
}

fn default_bot_label() -> String {
    "AI Assistant".to_string()
}

fn default_color() -> bool {
    true
}

fn default_clock_interval() -> u64 {
    60
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            user_label: default_user_label(),
            bot_label: default_bot_label(),
            color: default_color(),
            clock_interval_seconds: default_clock_interval(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit structured JSON log lines instead of human-readable text
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChatWidgetError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ChatWidgetError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("CHATWIDGET_SERVER_URL") {
            self.server.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("CHATWIDGET_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.server.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid CHATWIDGET_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if std::env::var_os("CHATWIDGET_NO_COLOR").is_some() {
            self.ui.color = false;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(server) = &cli.server {
            tracing::debug!("Using server override from CLI: {}", server);
            self.server.base_url = server.clone();
        }
        if cli.no_color {
            self.ui.color = false;
        }
    }

    /// Parsed form of `server.base_url`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not parse or is not
    /// http(s)
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.server.base_url).map_err(|e| {
            ChatWidgetError::Config(format!(
                "Invalid server.base_url '{}': {}",
                self.server.base_url, e
            ))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ChatWidgetError::Config(format!(
                "server.base_url must use http or https, got '{}'",
                url.scheme()
            ))
            .into());
        }
        Ok(url)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;

        if self.server.timeout_seconds == 0 {
            return Err(ChatWidgetError::Config(
                "server.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.ui.clock_interval_seconds == 0 {
            return Err(ChatWidgetError::Config(
                "ui.clock_interval_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.ui.user_label.trim().is_empty() || self.ui.bot_label.trim().is_empty() {
            return Err(
                ChatWidgetError::Config("ui sender labels cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
