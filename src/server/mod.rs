//! Dashboard HTTP server
//!
//! Serves the dashboard state, refresh/forecast actions, chart series and
//! the CSV download over a small JSON API.

pub mod api;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::dashboard::Dashboard;

pub use api::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Dashboard service
    pub dashboard: Arc<Dashboard>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create state around a dashboard
    pub fn new(dashboard: Arc<Dashboard>) -> Self {
        Self {
            dashboard,
            start_time: Instant::now(),
        }
    }
}

// ============================================================================
// Dashboard Server
// ============================================================================

/// Main dashboard server
pub struct DashboardServer {
    config: ServerConfig,
    bind_address: SocketAddr,
    state: AppState,
}

impl DashboardServer {
    /// Create a new dashboard server
    pub fn new(config: ServerConfig, dashboard: Arc<Dashboard>) -> Result<Self, ServerError> {
        let bind_address = format!("{}:{}", config.host, config.port)
            .parse::<SocketAddr>()
            .map_err(|e| ServerError::ConfigError(format!("invalid bind address: {e}")))?;

        Ok(Self {
            config,
            bind_address,
            state: AppState::new(dashboard),
        })
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> SocketAddr {
        self.bind_address
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.bind_address;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(e.to_string()))?;

        tracing::info!("Starting dashboard server on {}", addr);

        if self.config.initial_fetch {
            self.spawn_initial_fetch();
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        tracing::info!("Dashboard server shutdown complete");
        Ok(())
    }

    /// Load the first snapshot in the background
    fn spawn_initial_fetch(&self) {
        let dashboard = self.state.dashboard.clone();
        tokio::spawn(async move {
            if let Err(e) = dashboard.refresh().await {
                tracing::warn!(error = %e, "Initial trend fetch failed");
            }
        });
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failed to bind to address
    #[error("Failed to bind: {0}")]
    BindError(String),

    /// Server error
    #[error("Server error: {0}")]
    ServeError(String),
}

// ============================================================================
// Tests
// ============================================================================
