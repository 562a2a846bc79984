//! sonicpulse - Trending music dashboard
//!
//! Builds a "top 10 trending songs" leaderboard from a search-grounded
//! generative-AI provider, forecasts where the chart is heading and exports
//! the list as CSV.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`provider`] - Provider trait, Gemini REST client and test stub
//! - [`trends`] - Trend fetcher (discovery + extraction) and forecast generator
//! - [`dashboard`] - Explicit dashboard state machine and service
//! - [`analytics`] - Headline stats and chart series
//! - [`export`] - CSV export
//! - [`server`] - HTTP API for a browser front-end
//! - [`models`] - Core data structures and types
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sonicpulse::config::Config;
//! use sonicpulse::provider::GeminiClient;
//! use sonicpulse::trends::TrendFetcher;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let provider = Arc::new(GeminiClient::from_config(&config.provider)?);
//!     let data = TrendFetcher::new(provider).fetch().await?;
//!     println!("{} songs, {}", data.songs.len(), data.summary);
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod models;
pub mod provider;
pub mod server;
pub mod trends;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::dashboard::{Dashboard, DashboardState, LoadingState};
    pub use crate::error::{Error, ErrorCategory, Result, SonicPulseErrorTrait};
    pub use crate::models::{AnalyticsData, GroundingSource, Song, TrendDirection};
    pub use crate::provider::{GeminiClient, Provider, StubProvider};
    pub use crate::trends::{ForecastGenerator, TrendFetcher};
}

// Direct re-exports for convenience
pub use models::{AnalyticsData, GroundingSource, Song};
