//! Refresh → forecast → export flow

use sonicpulse::analytics::{dominant_genre, top_artist, ChartData};
use sonicpulse::config::DashboardConfig;
use sonicpulse::dashboard::LoadingState;
use sonicpulse::export;
use wiremock::MockServer;

use super::fixtures::{self, FORECAST_TEXT};

#[tokio::test]
async fn test_full_dashboard_flow() {
    let mock_server = MockServer::start().await;
    fixtures::mount_happy_path(&mock_server).await;

    let dashboard = fixtures::dashboard(&mock_server, &DashboardConfig::default());

    let data = dashboard.refresh().await.unwrap();
    assert_eq!(data.songs.len(), 3);
    assert_eq!(
        data.songs.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        vec!["song-0", "song-1", "song-2"]
    );
    assert_eq!(data.sources.len(), 2);
    assert_eq!(top_artist(&data.songs), Some("Lumen"));
    assert_eq!(dominant_genre(&data.songs), Some("Synth-Pop"));

    let charts = ChartData::from_songs(&data.songs);
    assert_eq!(charts.genres[0].name, "Synth-Pop");
    assert_eq!(charts.genres[0].value, 2);
    assert_eq!(charts.streams.len(), 3);

    let forecast = dashboard.predict().await.unwrap();
    assert_eq!(forecast.as_deref(), Some(FORECAST_TEXT));

    let state = dashboard.snapshot();
    assert_eq!(state.phase, LoadingState::Idle);
    assert_eq!(state.forecast.as_deref(), Some(FORECAST_TEXT));
    assert!(state.error.is_none());

    let csv = export::to_csv(&data.songs).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains(r#"1,"Neon Skies","Lumen","Synth-Pop",8.4,97,"up""#));
}

#[tokio::test]
async fn test_refresh_keeps_forecast_by_default() {
    let mock_server = MockServer::start().await;
    fixtures::mount_happy_path(&mock_server).await;

    let dashboard = fixtures::dashboard(&mock_server, &DashboardConfig::default());
    dashboard.refresh().await.unwrap();
    dashboard.predict().await.unwrap();
    dashboard.refresh().await.unwrap();

    let state = dashboard.snapshot();
    assert_eq!(state.forecast.as_deref(), Some(FORECAST_TEXT));
}

#[tokio::test]
async fn test_refresh_clears_forecast_when_configured() {
    let mock_server = MockServer::start().await;
    fixtures::mount_happy_path(&mock_server).await;

    let config = DashboardConfig {
        clear_forecast_on_refresh: true,
    };
    let dashboard = fixtures::dashboard(&mock_server, &config);
    dashboard.refresh().await.unwrap();
    dashboard.predict().await.unwrap();
    dashboard.refresh().await.unwrap();

    let state = dashboard.snapshot();
    assert!(state.forecast.is_none());
    assert!(state.data.is_some());
}

#[tokio::test]
async fn test_provider_call_count() {
    let mock_server = MockServer::start().await;
    fixtures::mount_happy_path(&mock_server).await;

    let dashboard = fixtures::dashboard(&mock_server, &DashboardConfig::default());
    dashboard.refresh().await.unwrap();
    dashboard.predict().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    // discovery, extraction, forecast
    assert_eq!(requests.len(), 3);
    assert!(requests
        .iter()
        .all(|r| r.headers.get("x-goog-api-key").is_some()));
}
