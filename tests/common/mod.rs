//! Common test utilities

#![allow(dead_code)]

use serde_json::{json, Value};
use sonicpulse::models::Song;

/// Model name used against mock servers
pub const TEST_MODEL: &str = "gemini-test";

/// Credential used against mock servers
pub const TEST_API_KEY: &str = "test-key";

/// Extraction answer holding a single song
pub const ONE_SONG_JSON: &str = r#"{"songs":[{"rank":1,"title":"A","artist":"X","genre":"Pop","popularityScore":90,"dailyStreams":50,"trend":"up"}],"summary":"S"}"#;

/// Request path of generateContent for the test model
pub fn generate_path() -> String {
    format!("/v1beta/models/{TEST_MODEL}:generateContent")
}

/// Gemini response carrying plain text
pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

/// Gemini response carrying text and grounding chunks
pub fn grounded_response(text: &str, chunks: Vec<Value>) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "groundingMetadata": {
                "webSearchQueries": ["top trending songs today"],
                "groundingChunks": chunks
            }
        }]
    })
}

/// Web grounding chunk
pub fn web_chunk(title: &str, uri: &str) -> Value {
    json!({ "web": { "uri": uri, "title": title } })
}

/// Grounding chunk without a web payload
pub fn non_web_chunk() -> Value {
    json!({ "retrievedContext": { "uri": "gs://corpus/doc-1", "title": "internal" } })
}

/// Create a song with default numbers
pub fn create_song(rank: f64, title: &str, artist: &str, genre: &str) -> Song {
    Song {
        id: Song::positional_id(rank as usize - 1),
        rank,
        title: title.to_string(),
        artist: artist.to_string(),
        genre: genre.to_string(),
        popularity_score: 80.0,
        daily_streams: 4.5,
        trend: "steady".to_string(),
    }
}
