pub mod export;
pub mod fetch;
pub mod forecast;
pub mod serve;

// Re-export command functions for convenience
pub use export::export;
pub use fetch::fetch;
pub use forecast::forecast;
pub use serve::serve;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use sonicpulse::config::Config;
use sonicpulse::provider::{GeminiClient, Provider};
use sonicpulse::AnalyticsData;

/// Load configuration from `path`, or from the environment alone
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::from_env(),
    }
}

/// Build the configured provider client
pub fn build_provider(config: &Config) -> Result<Arc<dyn Provider>> {
    config.require_api_key()?;
    let client = GeminiClient::from_config(&config.provider)
        .context("Failed to create Gemini client")?;
    Ok(Arc::new(client))
}

/// Read a snapshot previously written by `fetch --json`
pub fn load_snapshot(path: &Path) -> Result<AnalyticsData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}
