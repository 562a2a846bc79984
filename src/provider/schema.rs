//! Output schemas declared to the provider
//!
//! Schemas use the OpenAPI subset Gemini accepts for `responseSchema`
//! (`OBJECT`, `ARRAY`, `STRING`, `NUMBER`).

use serde_json::{json, Value};

/// Fields every extracted song object must carry
pub const SONG_FIELDS: [&str; 7] = [
    "rank",
    "title",
    "artist",
    "genre",
    "popularityScore",
    "dailyStreams",
    "trend",
];

/// Schema of the extraction answer: `{ songs: [Song], summary }`
pub fn song_list_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "songs": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "rank": { "type": "NUMBER" },
                        "title": { "type": "STRING" },
                        "artist": { "type": "STRING" },
                        "genre": { "type": "STRING" },
                        "popularityScore": { "type": "NUMBER" },
                        "dailyStreams": { "type": "NUMBER" },
                        "trend": { "type": "STRING" }
                    },
                    "required": SONG_FIELDS
                }
            },
            "summary": { "type": "STRING" }
        },
        "required": ["songs", "summary"]
    })
}
