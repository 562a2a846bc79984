//! Trend fetcher
//!
//! One [`TrendFetcher::fetch`] call runs two provider requests in sequence:
//!
//! 1. grounded discovery of today's trending songs (text + citations)
//! 2. schema-constrained extraction of that text into a song list
//!
//! and assembles the result into an [`AnalyticsData`] snapshot. Nothing is
//! retried and no partial snapshot is ever produced.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

use super::prompts;
use crate::error::{ExtractionError, Result};
use crate::models::{AnalyticsData, GroundingSource, Song};
use crate::provider::{schema, Citation, Provider};
use crate::utils::log_preview;

/// Song object as emitted by the extraction step
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractedSong {
    rank: f64,
    title: String,
    artist: String,
    genre: String,
    popularity_score: f64,
    daily_streams: f64,
    trend: String,
}

/// Extraction answer
#[derive(Debug, Deserialize)]
struct Extraction {
    songs: Vec<ExtractedSong>,
    summary: String,
}

/// Project web citations to grounding sources, keeping provider order
pub fn collect_sources(citations: &[Citation]) -> Vec<GroundingSource> {
    citations
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| GroundingSource {
            title: web.title.clone(),
            uri: web.uri.clone(),
        })
        .collect()
}

/// Parse the extraction JSON and build a snapshot
///
/// Ids are assigned from array position (`song-0`, `song-1`, ...) and never
/// reconciled with the provider's `rank`.
pub fn assemble(
    extraction_json: &str,
    sources: Vec<GroundingSource>,
    last_updated: DateTime<Utc>,
) -> std::result::Result<AnalyticsData, ExtractionError> {
    let extraction: Extraction = serde_json::from_str(extraction_json)?;

    let songs = extraction
        .songs
        .into_iter()
        .enumerate()
        .map(|(idx, s)| Song {
            id: Song::positional_id(idx),
            rank: s.rank,
            title: s.title,
            artist: s.artist,
            genre: s.genre,
            popularity_score: s.popularity_score,
            daily_streams: s.daily_streams,
            trend: s.trend,
        })
        .collect();

    Ok(AnalyticsData {
        songs,
        sources,
        summary: extraction.summary,
        last_updated,
    })
}

/// Fetches trending-song snapshots from a provider
#[derive(Clone)]
pub struct TrendFetcher {
    provider: Arc<dyn Provider>,
}

impl TrendFetcher {
    /// Create a fetcher over `provider`
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Run discovery, extraction and assembly
    pub async fn fetch(&self) -> Result<AnalyticsData> {
        tracing::info!(provider = self.provider.name(), "Fetching trending songs");

        let discovery = self
            .provider
            .generate_grounded(prompts::DISCOVERY_PROMPT)
            .await?;
        let sources = collect_sources(&discovery.citations);

        tracing::debug!(
            chars = discovery.text.len(),
            citations = discovery.citations.len(),
            sources = sources.len(),
            "Discovery step finished"
        );

        let extraction_json = self
            .provider
            .generate_structured(
                &prompts::extraction_prompt(&discovery.text),
                &schema::song_list_schema(),
            )
            .await?;

        let data = assemble(&extraction_json, sources, Utc::now()).map_err(|e| {
            tracing::warn!(
                "Failed to parse extraction response: {}. Response truncated: {}",
                e,
                log_preview(&extraction_json, 200)
            );
            e
        })?;

        tracing::info!(
            songs = data.songs.len(),
            sources = data.sources.len(),
            "Trending snapshot assembled"
        );

        Ok(data)
    }
}
