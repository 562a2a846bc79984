//! Unified error handling for the sonicpulse crate
//!
//! Each domain keeps its own error enum (provider calls, extraction parsing,
//! CSV export) and the crate-wide [`Error`] wraps them so that callers can
//! propagate everything with `?` and still classify failures.
//!
//! # Architecture
//!
//! - [`SonicPulseErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use sonicpulse::error::{Error, SonicPulseErrorTrait};
//!
//! fn report(err: &Error) {
//!     if err.is_recoverable() {
//!         eprintln!("{} (try again)", err.user_message());
//!     } else {
//!         eprintln!("Fatal: {err}");
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

/// Message shown to users whenever a trend fetch fails
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to fetch real-time music data. Please try again.";

/// Common trait for all sonicpulse error types
pub trait SonicPulseErrorTrait: std::error::Error {
    /// Check if this error is recoverable (a user-triggered retry may succeed)
    fn is_recoverable(&self) -> bool;

    /// Short message suitable for end users
    fn user_message(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Provider transport and HTTP status failures
    Network,
    /// Structured output that could not be decoded
    Parsing,
    /// File system and export errors
    Storage,
    /// Configuration and validation errors
    Config,
}

impl ErrorCategory {
    /// Human readable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Parsing => "parsing error",
            Self::Storage => "storage error",
            Self::Config => "configuration error",
        }
    }
}

/// Errors raised by a generative-AI provider call
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status code
    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Body could not be decoded as a provider response
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Response carried no candidate text
    #[error("Provider returned an empty response")]
    EmptyResponse,

    /// Client could not be built from its configuration
    #[error("Invalid provider configuration: {0}")]
    Config(String),
}

impl ProviderError {
    /// Check if a retry could help
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::EmptyResponse => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidResponse(_) | Self::Config(_) => false,
        }
    }
}

/// Errors raised while turning structured output into typed data
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Extraction body was not valid JSON or missed required fields
    #[error("Malformed extraction JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Errors raised by the CSV export
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV writer failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Written bytes were not UTF-8
    #[error("CSV output is not valid UTF-8")]
    Encoding,
}

impl SonicPulseErrorTrait for ExportError {
    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    fn user_message(&self) -> String {
        format!("Export failed: {self}")
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Storage
    }
}

/// Unified error type for the sonicpulse crate
#[derive(Error, Debug)]
pub enum Error {
    /// Provider call failures
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Structured extraction failures
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),
}

impl SonicPulseErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_recoverable(),
            // the provider may well produce valid output on the next call
            Self::Extraction(_) => true,
        }
    }

    fn user_message(&self) -> String {
        FETCH_FAILURE_MESSAGE.to_string()
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Provider(ProviderError::Config(_)) => ErrorCategory::Config,
            Self::Provider(_) => ErrorCategory::Network,
            Self::Extraction(_) => ErrorCategory::Parsing,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
