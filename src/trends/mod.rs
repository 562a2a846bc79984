//! Provider-backed trend discovery and forecasting
//!
//! - [`fetcher`] - two-step grounded discovery + structured extraction
//! - [`forecast`] - free-text three-month outlook
//! - [`prompts`] - prompt templates shared by both

pub mod fetcher;
pub mod forecast;
pub mod prompts;

pub use fetcher::TrendFetcher;
pub use forecast::ForecastGenerator;
