//! Derived figures shown next to the leaderboard
//!
//! Headline stats (top artist, dominant genre), the two chart series (genre
//! prevalence and top-5 daily streams) and forecast paragraph splitting.

use serde::Serialize;

use crate::models::{AnalyticsData, Song};
use crate::utils::truncate_text;

/// Number of songs plotted in the streams chart
pub const STREAM_CHART_SIZE: usize = 5;

/// Longest chart label kept intact
pub const CHART_LABEL_MAX: usize = 15;

/// Slice of the genre prevalence chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreShare {
    pub name: String,
    pub value: usize,
}

/// Bar of the daily streams chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamBar {
    pub name: String,
    pub streams: f64,
}

/// Both chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub genres: Vec<GenreShare>,
    pub streams: Vec<StreamBar>,
}

impl ChartData {
    /// Build chart series for `songs`
    pub fn from_songs(songs: &[Song]) -> Self {
        Self {
            genres: genre_distribution(songs),
            streams: stream_leaders(songs),
        }
    }
}

/// Headline stats of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineStats {
    pub top_artist: Option<String>,
    pub dominant_genre: Option<String>,
    pub last_sync: String,
}

impl HeadlineStats {
    /// Compute headline stats for a snapshot
    pub fn from_data(data: &AnalyticsData) -> Self {
        Self {
            top_artist: top_artist(&data.songs).map(str::to_string),
            dominant_genre: dominant_genre(&data.songs).map(str::to_string),
            last_sync: data.last_updated_display(),
        }
    }
}

/// Artist of the first listed song
pub fn top_artist(songs: &[Song]) -> Option<&str> {
    songs.first().map(|s| s.artist.as_str())
}

/// Most frequent genre
///
/// Ties go to the genre listed first.
pub fn dominant_genre(songs: &[Song]) -> Option<&str> {
    genre_distribution(songs)
        .into_iter()
        .fold(None::<GenreShare>, |best, share| match best {
            Some(b) if b.value >= share.value => Some(b),
            _ => Some(share),
        })
        .and_then(|best| {
            songs
                .iter()
                .map(|s| s.genre.as_str())
                .find(|g| *g == best.name)
        })
}

/// Count of songs per genre, in first-appearance order
pub fn genre_distribution(songs: &[Song]) -> Vec<GenreShare> {
    let mut shares: Vec<GenreShare> = Vec::new();

    for song in songs {
        match shares.iter_mut().find(|s| s.name == song.genre) {
            Some(share) => share.value += 1,
            None => shares.push(GenreShare {
                name: song.genre.clone(),
                value: 1,
            }),
        }
    }

    shares
}

/// Daily streams of the first five songs, with chart-sized labels
pub fn stream_leaders(songs: &[Song]) -> Vec<StreamBar> {
    songs
        .iter()
        .take(STREAM_CHART_SIZE)
        .map(|s| StreamBar {
            name: truncate_text(&s.title, CHART_LABEL_MAX),
            streams: s.daily_streams,
        })
        .collect()
}

/// Non-empty trimmed lines of a forecast
pub fn forecast_paragraphs(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
