// Core data structures for the trending music dashboard

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the trending leaderboard
///
/// Every field except `id` comes straight from the provider's structured
/// output and is trusted as-is: ranks may repeat or skip, scores are not
/// clamped and `trend` may hold any string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String, // positional tag, "song-<index>"
    pub rank: f64,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub popularity_score: f64, // nominally 1-100
    pub daily_streams: f64,    // estimated, millions
    pub trend: String,
}

impl Song {
    /// Positional identifier for the song at `index`
    pub fn positional_id(index: usize) -> String {
        format!("song-{index}")
    }

    /// Classify the free-text trend for display
    pub fn trend_direction(&self) -> TrendDirection {
        TrendDirection::parse(&self.trend)
    }
}

/// Display classification of [`Song::trend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Steady,
    Other,
}

impl TrendDirection {
    /// Parse a provider trend label, case-insensitively
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            "steady" => Self::Steady,
            _ => Self::Other,
        }
    }

    /// Terminal glyph for the direction
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Steady => "–",
            Self::Other => "?",
        }
    }
}

/// A web citation attached to the grounded discovery answer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// One complete result of a trend fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub songs: Vec<Song>,
    pub sources: Vec<GroundingSource>,
    pub summary: String,
    pub last_updated: DateTime<Utc>,
}

impl AnalyticsData {
    /// Fetch completion time in client-local wall-clock format
    pub fn last_updated_display(&self) -> String {
        self.last_updated
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }

    /// Check if the snapshot holds any songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} by {} ({})", self.rank, self.title, self.artist, self.genre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song() -> Song {
        Song {
            id: Song::positional_id(0),
            rank: 1.0,
            title: "Espresso".to_string(),
            artist: "Sabrina Carpenter".to_string(),
            genre: "Pop".to_string(),
            popularity_score: 97.0,
            daily_streams: 8.5,
            trend: "up".to_string(),
        }
    }

    #[test]
    fn test_positional_id() {
        assert_eq!(Song::positional_id(0), "song-0");
        assert_eq!(Song::positional_id(9), "song-9");
    }

    #[test]
    fn test_song_display_matches_forecast_line() {
        assert_eq!(song().to_string(), "1. Espresso by Sabrina Carpenter (Pop)");
    }

    #[test]
    fn test_trend_direction_is_lenient() {
        assert_eq!(TrendDirection::parse("UP"), TrendDirection::Up);
        assert_eq!(TrendDirection::parse(" down "), TrendDirection::Down);
        assert_eq!(TrendDirection::parse("steady"), TrendDirection::Steady);
        assert_eq!(TrendDirection::parse("new entry"), TrendDirection::Other);
    }

    #[test]
    fn test_unknown_trend_is_kept_verbatim() {
        let mut s = song();
        s.trend = "rocketing".to_string();
        assert_eq!(s.trend_direction(), TrendDirection::Other);
        assert_eq!(s.trend, "rocketing");
    }

    #[test]
    fn test_song_serializes_camel_case() {
        let json = serde_json::to_value(song()).unwrap();
        assert_eq!(json["popularityScore"], 97.0);
        assert_eq!(json["dailyStreams"], 8.5);
        assert_eq!(json["id"], "song-0");
    }

    #[test]
    fn test_analytics_data_roundtrip_through_json() {
        let data = AnalyticsData {
            songs: vec![song()],
            sources: vec![GroundingSource {
                title: "Billboard".to_string(),
                uri: "https://www.billboard.com/charts/hot-100/".to_string(),
            }],
            summary: "Pop dominates".to_string(),
            last_updated: Utc::now(),
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("lastUpdated"));
        let back: AnalyticsData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
        assert!(!back.is_empty());
        assert_eq!(back.last_updated_display().len(), 8);
    }
}
