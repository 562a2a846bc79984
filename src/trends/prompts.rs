//! Prompt templates sent to the provider

use crate::models::Song;

/// Grounded discovery prompt
pub const DISCOVERY_PROMPT: &str = "Find the top 10 trending songs globally as of today. \
Include title, artist, genre, and their current chart movement (up/down/steady). \
Provide a brief summary of the current music landscape.";

/// Build the extraction prompt around the discovery answer
pub fn extraction_prompt(discovery_text: &str) -> String {
    format!(
        r#"Based on the following information about trending music, extract a clean JSON list of the top 10 songs.
Information: {discovery_text}

Format each song as: {{ "rank": number, "title": string, "artist": string, "genre": string, "popularityScore": number (1-100), "dailyStreams": number (estimated in millions), "trend": "up" | "down" | "steady" }}"#
    )
}

/// One line per song, `<rank>. <title> by <artist> (<genre>)`, in input order
pub fn song_list(songs: &[Song]) -> String {
    songs
        .iter()
        .map(Song::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the three-month forecast prompt
pub fn forecast_prompt(songs: &[Song]) -> String {
    format!(
        "As an expert music analyst, provide a detailed 3-paragraph prediction on how these \
current trends will evolve over the next 3 months. Mention specific genres that are gaining \
momentum and why some artists might stay on top or drop off. Data: \n{}",
        song_list(songs)
    )
}
