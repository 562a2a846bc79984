//! Forecast generator
//!
//! Asks the provider for a narrative three-month outlook on a song list. The
//! answer is returned verbatim; splitting it into paragraphs is left to the
//! caller (see [`crate::analytics::forecast_paragraphs`]).

use std::sync::Arc;

use super::prompts;
use crate::error::Result;
use crate::models::Song;
use crate::provider::Provider;

/// Produces free-text forecasts from a provider
#[derive(Clone)]
pub struct ForecastGenerator {
    provider: Arc<dyn Provider>,
}

impl ForecastGenerator {
    /// Create a generator over `provider`
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Request a forecast for `songs`
    ///
    /// An empty list still issues the request.
    pub async fn forecast(&self, songs: &[Song]) -> Result<String> {
        tracing::info!(songs = songs.len(), "Requesting trend forecast");

        let text = self
            .provider
            .generate_free(&prompts::forecast_prompt(songs))
            .await?;

        tracing::debug!(chars = text.len(), "Forecast received");
        Ok(text)
    }
}
