//! Generative-AI provider binding
//!
//! The trend fetcher and forecast generator only ever talk to a
//! [`Provider`]. The trait exposes the three request shapes the dashboard
//! needs:
//!
//! - grounded generation (web search enabled, citations returned)
//! - structured generation (output constrained by a JSON schema)
//! - free generation (plain text)
//!
//! [`gemini::GeminiClient`] implements it over the Gemini REST API and
//! [`stub::StubProvider`] replays scripted answers for tests.

pub mod gemini;
pub mod schema;
pub mod stub;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

pub use gemini::GeminiClient;
pub use stub::StubProvider;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Web reference carried by a citation chunk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebReference {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub uri: String,
}

/// One citation chunk of a grounded answer
///
/// Providers also return citations backed by non-web retrieval; those carry
/// no `web` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default)]
    pub web: Option<WebReference>,
}

impl Citation {
    /// Citation backed by a web page
    pub fn web(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            web: Some(WebReference {
                title: title.into(),
                uri: uri.into(),
            }),
        }
    }

    /// Citation without a web payload
    pub fn non_web() -> Self {
        Self { web: None }
    }
}

/// Answer of a grounded generation call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundedResponse {
    /// Free-text answer
    pub text: String,

    /// Citation chunks in provider order
    pub citations: Vec<Citation>,
}

/// Narrow interface over a generative-AI provider
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &str;

    /// Generate text with web-search grounding enabled
    async fn generate_grounded(&self, prompt: &str) -> ProviderResult<GroundedResponse>;

    /// Generate JSON text constrained by `schema`
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> ProviderResult<String>;

    /// Generate unconstrained text
    async fn generate_free(&self, prompt: &str) -> ProviderResult<String>;
}
