//! Dashboard service
//!
//! Owns the only mutable state of the application: the latest snapshot,
//! the forecast text and the loading/error flags. Provider calls run outside
//! the state lock; every completed call replaces state atomically. The lock
//! is never held across an `.await`.
//!
//! An operation whose future is dropped mid-flight (client disconnect,
//! timeout, shutdown) is closed by [`DashboardState::abandon`], so the next
//! refresh or forecast is accepted.

pub mod state;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::DashboardConfig;
use crate::error::{Error, SonicPulseErrorTrait, FETCH_FAILURE_MESSAGE};
use crate::models::AnalyticsData;
use crate::provider::Provider;
use crate::trends::{ForecastGenerator, TrendFetcher};

pub use state::{DashboardEvent, DashboardState, LoadingState, TransitionError};

/// Errors surfaced by dashboard operations
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Operation not allowed in the current phase
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Trend fetch failed
    #[error("Trend fetch failed: {0}")]
    Fetch(#[source] Error),
}

/// Drives the fetcher and forecaster through the state machine
pub struct Dashboard {
    fetcher: TrendFetcher,
    forecaster: ForecastGenerator,
    state: RwLock<DashboardState>,
    clear_forecast_on_refresh: bool,
}

/// Abandons the in-flight operation on drop unless disarmed
struct InFlight<'a> {
    state: &'a RwLock<DashboardState>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a RwLock<DashboardState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let from = state.phase;
        if state.abandon(FETCH_FAILURE_MESSAGE).is_ok() {
            tracing::warn!(phase = %from, "Dashboard operation dropped before completion");
        }
    }
}

impl Dashboard {
    /// Create a dashboard over `provider`
    pub fn new(provider: Arc<dyn Provider>, config: &DashboardConfig) -> Self {
        Self {
            fetcher: TrendFetcher::new(provider.clone()),
            forecaster: ForecastGenerator::new(provider),
            state: RwLock::new(DashboardState::new()),
            clear_forecast_on_refresh: config.clear_forecast_on_refresh,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DashboardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> DashboardState {
        self.read().clone()
    }

    /// Latest trend data, if any
    pub fn data(&self) -> Option<AnalyticsData> {
        self.read().data.clone()
    }

    /// Fetch a new snapshot and install it
    ///
    /// On failure the user-facing message is stored in the state and the
    /// previous snapshot is kept.
    pub async fn refresh(&self) -> Result<AnalyticsData, DashboardError> {
        self.write().begin_fetch()?;
        let in_flight = InFlight::new(&self.state);

        let result = self.fetcher.fetch().await;
        in_flight.disarm();

        match result {
            Ok(data) => {
                self.write()
                    .fetch_succeeded(data.clone(), self.clear_forecast_on_refresh)?;
                Ok(data)
            }
            Err(e) => {
                tracing::error!(error = %e, category = e.category().label(), "Trend fetch failed");
                self.write().fetch_failed(e.user_message())?;
                Err(DashboardError::Fetch(e))
            }
        }
    }

    /// Generate a forecast for the current songs
    ///
    /// Provider failures are logged and swallowed: the state returns to
    /// idle unchanged and `Ok(None)` is returned.
    pub async fn predict(&self) -> Result<Option<String>, DashboardError> {
        let songs = self.write().begin_forecast()?;
        let in_flight = InFlight::new(&self.state);

        let result = self.forecaster.forecast(&songs).await;
        in_flight.disarm();

        match result {
            Ok(text) => {
                self.write().forecast_succeeded(text.clone())?;
                Ok(Some(text))
            }
            Err(e) => {
                tracing::error!(error = %e, "Forecast generation failed");
                self.write().forecast_failed()?;
                Ok(None)
            }
        }
    }
}
