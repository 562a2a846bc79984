//! Dashboard state machine
//!
//! ```text
//! Idle/Error --begin_fetch--> Searching --fetch_succeeded--> Idle
//!                                       --fetch_failed-----> Error
//! Idle/Error (data) --begin_forecast--> Analyzing --forecast_*--> Idle
//! Searching --abandon--> Error
//! Analyzing --abandon--> Idle
//! ```
//!
//! A rejected transition leaves the state untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{AnalyticsData, Song};

/// Activity phase of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadingState {
    #[default]
    Idle,
    Searching,
    Analyzing,
    Error,
}

impl fmt::Display for LoadingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Searching => "searching",
            Self::Analyzing => "analyzing",
            Self::Error => "in error",
        };
        f.write_str(s)
    }
}

/// Events driving the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardEvent {
    BeginFetch,
    FetchSucceeded,
    FetchFailed,
    BeginForecast,
    ForecastSucceeded,
    ForecastFailed,
    Abandon,
}

impl fmt::Display for DashboardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BeginFetch => "start a fetch",
            Self::FetchSucceeded => "complete a fetch",
            Self::FetchFailed => "fail a fetch",
            Self::BeginForecast => "start a forecast",
            Self::ForecastSucceeded => "complete a forecast",
            Self::ForecastFailed => "fail a forecast",
            Self::Abandon => "abandon an operation",
        };
        f.write_str(s)
    }
}

/// Rejected transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Event not accepted in the current phase
    #[error("cannot {event} while {from}")]
    NotAllowed {
        from: LoadingState,
        event: DashboardEvent,
    },

    /// Forecast requested before any snapshot was loaded
    #[error("no trend data loaded yet")]
    NoData,
}

/// Everything the dashboard displays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub phase: LoadingState,
    pub data: Option<AnalyticsData>,
    pub forecast: Option<String>,
    pub error: Option<String>,
}

impl DashboardState {
    /// Fresh idle state with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    fn expect_phase(
        &self,
        allowed: &[LoadingState],
        event: DashboardEvent,
    ) -> Result<(), TransitionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(TransitionError::NotAllowed {
                from: self.phase,
                event,
            })
        }
    }

    /// Idle/Error -> Searching
    pub fn begin_fetch(&mut self) -> Result<(), TransitionError> {
        self.expect_phase(
            &[LoadingState::Idle, LoadingState::Error],
            DashboardEvent::BeginFetch,
        )?;
        self.phase = LoadingState::Searching;
        self.error = None;
        Ok(())
    }

    /// Searching -> Idle, replacing the snapshot wholesale
    pub fn fetch_succeeded(
        &mut self,
        data: AnalyticsData,
        clear_forecast: bool,
    ) -> Result<(), TransitionError> {
        self.expect_phase(&[LoadingState::Searching], DashboardEvent::FetchSucceeded)?;
        self.phase = LoadingState::Idle;
        self.data = Some(data);
        if clear_forecast {
            self.forecast = None;
        }
        Ok(())
    }

    /// Searching -> Error, keeping the previous snapshot
    pub fn fetch_failed(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        self.expect_phase(&[LoadingState::Searching], DashboardEvent::FetchFailed)?;
        self.phase = LoadingState::Error;
        self.error = Some(message.into());
        Ok(())
    }

    /// Idle/Error (with data) -> Analyzing; returns the songs to forecast
    ///
    /// A fetch error message is left in place.
    pub fn begin_forecast(&mut self) -> Result<Vec<Song>, TransitionError> {
        self.expect_phase(
            &[LoadingState::Idle, LoadingState::Error],
            DashboardEvent::BeginForecast,
        )?;
        let songs = self
            .data
            .as_ref()
            .map(|d| d.songs.clone())
            .ok_or(TransitionError::NoData)?;
        self.phase = LoadingState::Analyzing;
        Ok(songs)
    }

    /// Analyzing -> Idle with a new forecast
    pub fn forecast_succeeded(&mut self, text: impl Into<String>) -> Result<(), TransitionError> {
        self.expect_phase(&[LoadingState::Analyzing], DashboardEvent::ForecastSucceeded)?;
        self.phase = LoadingState::Idle;
        self.forecast = Some(text.into());
        Ok(())
    }

    /// Analyzing -> Idle, nothing else changes
    pub fn forecast_failed(&mut self) -> Result<(), TransitionError> {
        self.expect_phase(&[LoadingState::Analyzing], DashboardEvent::ForecastFailed)?;
        self.phase = LoadingState::Idle;
        Ok(())
    }

    /// Close an operation whose caller went away
    ///
    /// Searching -> Error with `message`, Analyzing -> Idle.
    pub fn abandon(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        match self.phase {
            LoadingState::Searching => {
                self.phase = LoadingState::Error;
                self.error = Some(message.into());
                Ok(())
            }
            LoadingState::Analyzing => {
                self.phase = LoadingState::Idle;
                Ok(())
            }
            from => Err(TransitionError::NotAllowed {
                from,
                event: DashboardEvent::Abandon,
            }),
        }
    }
}
