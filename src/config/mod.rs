//! Configuration management for sonicpulse
//!
//! This module handles loading and validating configuration from environment variables
//! and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default Gemini REST endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model used for every provider call
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Generative-AI provider configuration
    pub provider: ProviderConfig,

    /// Dashboard API server configuration
    pub server: ServerConfig,

    /// CSV export configuration
    pub export: ExportConfig,

    /// Dashboard state behaviour
    pub dashboard: DashboardConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Access credential
    pub api_key: Option<String>,

    /// Base URL of the REST API
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

// keeps the credential out of logs
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Dashboard API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Allow cross-origin requests from any origin
    pub enable_cors: bool,

    /// Trace every HTTP request
    pub enable_request_logging: bool,

    /// Run one refresh as soon as the server starts
    pub initial_fetch: bool,
}

/// CSV export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory CSV files are written to
    pub output_dir: PathBuf,
}

/// Dashboard state behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Drop the previous forecast when a new snapshot arrives
    pub clear_forecast_on_refresh: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl ProviderConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            enable_cors: true,
            enable_request_logging: true,
            initial_fetch: true,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a TOML file, then let environment variables override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config.apply_env();
        Ok(config)
    }

    /// Override fields from the environment
    fn apply_env(&mut self) {
        if let Some(key) = ["GEMINI_API_KEY", "API_KEY"]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
        {
            self.provider.api_key = Some(key);
        }
        if let Ok(endpoint) = std::env::var("SONICPULSE_ENDPOINT") {
            self.provider.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("SONICPULSE_MODEL") {
            self.provider.model = model;
        }
        if let Some(timeout) = env_parse("SONICPULSE_TIMEOUT") {
            self.provider.timeout_secs = timeout;
        }
        if let Ok(host) = std::env::var("SONICPULSE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_parse("SONICPULSE_PORT") {
            self.server.port = port;
        }
        if let Ok(dir) = std::env::var("SONICPULSE_EXPORT_DIR") {
            self.export.output_dir = PathBuf::from(dir);
        }
        if let Some(clear) = env_parse("SONICPULSE_CLEAR_FORECAST_ON_REFRESH") {
            self.dashboard.clear_forecast_on_refresh = clear;
        }
        if let Ok(level) = std::env::var("SONICPULSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SONICPULSE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.provider.endpoint)
            .with_context(|| format!("Invalid provider endpoint: {}", self.provider.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("provider endpoint must use http or https");
        }

        if self.provider.model.trim().is_empty() {
            anyhow::bail!("provider model must not be empty");
        }

        if self.provider.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("log format must be 'text' or 'json'");
        }

        self.bind_address()?;

        Ok(())
    }

    /// Check that a provider credential is present
    pub fn require_api_key(&self) -> Result<&str> {
        self.provider
            .api_key
            .as_deref()
            .context("No provider credential set (GEMINI_API_KEY or API_KEY)")
    }

    /// Socket address the dashboard API binds to
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| {
                format!("Invalid bind address {}:{}", self.server.host, self.server.port)
            })
    }
}
