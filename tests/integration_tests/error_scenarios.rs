//! Error scenario integration tests
//!
//! Failure modes of the provider and how the dashboard recovers from them.

use sonicpulse::config::DashboardConfig;
use sonicpulse::dashboard::{DashboardError, LoadingState};
use sonicpulse::provider::GeminiClient;
use sonicpulse::trends::TrendFetcher;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{MockServer, ResponseTemplate};

use super::fixtures::{self, discovery_body, text_body, EXTRACTION_JSON, MODEL};

const USER_MESSAGE: &str = "Failed to fetch real-time music data. Please try again.";

#[tokio::test]
async fn test_timeout_handling() {
    let mock_server = MockServer::start().await;
    fixtures::mount_discovery(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(discovery_body())
            .set_delay(Duration::from_secs(10)),
    )
    .await;

    let client = GeminiClient::with_base_url(
        &mock_server.uri(),
        MODEL,
        "flow-key",
        Duration::from_millis(100),
    )
    .unwrap();

    let result = TrendFetcher::new(Arc::new(client)).fetch().await;
    assert!(result.is_err(), "Should fail on timeout");
}

#[tokio::test]
async fn test_server_error_sets_error_phase() {
    let mock_server = MockServer::start().await;
    fixtures::mount_discovery(&mock_server, ResponseTemplate::new(500)).await;

    let dashboard = fixtures::dashboard(&mock_server, &DashboardConfig::default());
    let err = dashboard.refresh().await.unwrap_err();
    assert!(matches!(err, DashboardError::Fetch(_)));

    let state = dashboard.snapshot();
    assert_eq!(state.phase, LoadingState::Error);
    assert_eq!(state.error.as_deref(), Some(USER_MESSAGE));
    assert!(state.data.is_none());
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let mock_server = MockServer::start().await;
    fixtures::mount_happy_path(&mock_server).await;

    let dashboard = fixtures::dashboard(&mock_server, &DashboardConfig::default());
    let first = dashboard.refresh().await.unwrap();

    mock_server.reset().await;
    fixtures::mount_discovery(&mock_server, ResponseTemplate::new(503)).await;

    assert!(dashboard.refresh().await.is_err());

    let state = dashboard.snapshot();
    assert_eq!(state.phase, LoadingState::Error);
    assert_eq!(state.data, Some(first));
}

#[tokio::test]
async fn test_recovery_after_error() {
    let mock_server = MockServer::start().await;
    fixtures::mount_discovery(&mock_server, ResponseTemplate::new(429)).await;

    let dashboard = fixtures::dashboard(&mock_server, &DashboardConfig::default());
    assert!(dashboard.refresh().await.is_err());

    mock_server.reset().await;
    fixtures::mount_happy_path(&mock_server).await;

    let data = dashboard.refresh().await.unwrap();
    let state = dashboard.snapshot();
    assert_eq!(state.phase, LoadingState::Idle);
    assert!(state.error.is_none());
    assert_eq!(data.songs.len(), 3);
}

#[tokio::test]
async fn test_malformed_extraction() {
    let mock_server = MockServer::start().await;
    fixtures::mount_discovery(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(discovery_body()),
    )
    .await;
    fixtures::mount_extraction(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(text_body(&EXTRACTION_JSON[..40])),
    )
    .await;

    let dashboard = fixtures::dashboard(&mock_server, &DashboardConfig::default());
    assert!(dashboard.refresh().await.is_err());

    let state = dashboard.snapshot();
    assert_eq!(state.error.as_deref(), Some(USER_MESSAGE));
}

#[tokio::test]
async fn test_forecast_failure_is_swallowed() {
    let mock_server = MockServer::start().await;
    fixtures::mount_discovery(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(discovery_body()),
    )
    .await;
    fixtures::mount_extraction(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(text_body(EXTRACTION_JSON)),
    )
    .await;
    fixtures::mount_forecast(&mock_server, ResponseTemplate::new(500)).await;

    let dashboard = fixtures::dashboard(&mock_server, &DashboardConfig::default());
    dashboard.refresh().await.unwrap();

    let forecast = dashboard.predict().await.unwrap();
    assert!(forecast.is_none());

    let state = dashboard.snapshot();
    assert_eq!(state.phase, LoadingState::Idle);
    assert!(state.forecast.is_none());
    assert!(state.error.is_none());
}
