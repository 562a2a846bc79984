//! REST API handlers for the dashboard server
//!
//! This module defines the API routes and handlers a browser front-end calls.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::analytics::{forecast_paragraphs, ChartData, HeadlineStats};
use crate::dashboard::{DashboardError, DashboardState, TransitionError};
use crate::error::SonicPulseErrorTrait;
use crate::export;

use super::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data,
            error: Some(message.into()),
        }
    }
}

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Dashboard view: raw state plus derived headline stats
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    #[serde(flatten)]
    pub state: DashboardState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<HeadlineStats>,
    pub forecast_paragraphs: Vec<String>,
}

impl From<DashboardState> for DashboardView {
    fn from(state: DashboardState) -> Self {
        let stats = state.data.as_ref().map(HeadlineStats::from_data);
        let forecast_paragraphs = state
            .forecast
            .as_deref()
            .map(forecast_paragraphs)
            .unwrap_or_default()
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            state,
            stats,
            forecast_paragraphs,
        }
    }
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/refresh", post(refresh))
        .route("/api/forecast", post(forecast))
        .route("/api/charts", get(get_charts))
        .route("/api/export.csv", get(export_csv))
        .with_state(state)
}

fn conflict(err: &TransitionError) -> Response {
    (StatusCode::CONFLICT, Json(ErrorResponse::new(err.to_string()))).into_response()
}

fn no_data() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("no trend data loaded yet")),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    }))
}

/// Current dashboard state
async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let view = DashboardView::from(state.dashboard.snapshot());
    Json(ApiResponse::success(view))
}

/// Run a fetch and return the new state
async fn refresh(State(state): State<AppState>) -> Response {
    match state.dashboard.refresh().await {
        Ok(_) => {
            let view = DashboardView::from(state.dashboard.snapshot());
            (StatusCode::OK, Json(ApiResponse::success(view))).into_response()
        }
        Err(DashboardError::Transition(e)) => conflict(&e),
        Err(DashboardError::Fetch(_)) => {
            let snapshot = state.dashboard.snapshot();
            let message = snapshot.error.clone().unwrap_or_default();
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::failure(
                    Some(DashboardView::from(snapshot)),
                    message,
                )),
            )
                .into_response()
        }
    }
}

/// Generate a forecast and return the state
async fn forecast(State(state): State<AppState>) -> Response {
    match state.dashboard.predict().await {
        Ok(_) => {
            let view = DashboardView::from(state.dashboard.snapshot());
            (StatusCode::OK, Json(ApiResponse::success(view))).into_response()
        }
        Err(DashboardError::Transition(e)) => conflict(&e),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response(),
    }
}

/// Chart series for the loaded songs
async fn get_charts(State(state): State<AppState>) -> Response {
    match state.dashboard.data() {
        Some(data) => Json(ApiResponse::success(ChartData::from_songs(&data.songs))).into_response(),
        None => no_data(),
    }
}

/// CSV download of the loaded songs
async fn export_csv(State(state): State<AppState>) -> Response {
    let Some(data) = state.dashboard.data() else {
        return no_data();
    };

    match export::to_csv(&data.songs) {
        Ok(body) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                export::file_name(Utc::now().date_naive())
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, category = e.category().label(), "CSV export failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.user_message())),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
