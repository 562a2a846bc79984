//! Integration tests module
//!
//! Drives [`sonicpulse::dashboard::Dashboard`] through a real
//! [`sonicpulse::provider::GeminiClient`] pointed at a wiremock server.

pub mod dashboard_flow;
pub mod error_scenarios;
pub mod fixtures;
