//! Mock server fixtures

use serde_json::{json, Value};
use sonicpulse::config::DashboardConfig;
use sonicpulse::dashboard::Dashboard;
use sonicpulse::provider::GeminiClient;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MODEL: &str = "gemini-flow";

pub const DISCOVERY_TEXT: &str = "Global charts today are led by Neon Skies from Lumen, \
followed by Paper Hearts from The Folds and Ritmo from Sol Vega.";

pub const EXTRACTION_JSON: &str = r#"{
  "songs": [
    {"rank": 1, "title": "Neon Skies", "artist": "Lumen", "genre": "Synth-Pop", "popularityScore": 97, "dailyStreams": 8.4, "trend": "up"},
    {"rank": 2, "title": "Paper Hearts", "artist": "The Folds", "genre": "Indie", "popularityScore": 91, "dailyStreams": 6.1, "trend": "steady"},
    {"rank": 3, "title": "Ritmo", "artist": "Sol Vega", "genre": "Synth-Pop", "popularityScore": 88, "dailyStreams": 5.7, "trend": "down"}
  ],
  "summary": "Synth-pop dominates while indie holds steady."
}"#;

pub const FORECAST_TEXT: &str = "Synth-pop keeps its lead.\n\nLumen stays on top.\n\nIndie grows quietly.";

pub fn path_for_model() -> String {
    format!("/v1beta/models/{MODEL}:generateContent")
}

pub fn text_body(text: &str) -> Value {
    json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
}

pub fn discovery_body() -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": DISCOVERY_TEXT }] },
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "uri": "https://charts.example/global", "title": "Global Chart" } },
                    { "web": { "uri": "https://news.example/music", "title": "Music News" } }
                ]
            }
        }]
    })
}

/// Build a dashboard whose provider talks to `server`
pub fn dashboard(server: &MockServer, config: &DashboardConfig) -> Dashboard {
    let client = GeminiClient::with_base_url(
        &server.uri(),
        MODEL,
        "flow-key",
        Duration::from_secs(5),
    )
    .unwrap();
    Dashboard::new(Arc::new(client), config)
}

pub async fn mount_discovery(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(path_for_model()))
        .and(body_string_contains("google_search"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_extraction(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(path_for_model()))
        .and(body_string_contains("responseSchema"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(path_for_model()))
        .and(body_string_contains("3-paragraph prediction"))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Mount a fully working provider
pub async fn mount_happy_path(server: &MockServer) {
    mount_discovery(server, ResponseTemplate::new(200).set_body_json(discovery_body())).await;
    mount_extraction(
        server,
        ResponseTemplate::new(200).set_body_json(text_body(EXTRACTION_JSON)),
    )
    .await;
    mount_forecast(
        server,
        ResponseTemplate::new(200).set_body_json(text_body(FORECAST_TEXT)),
    )
    .await;
}
