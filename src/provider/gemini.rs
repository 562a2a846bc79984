//! Gemini REST client
//!
//! Talks to `POST {endpoint}/v1beta/models/{model}:generateContent` with the
//! credential in the `x-goog-api-key` header.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Citation, GroundedResponse, Provider, ProviderResult};
use crate::config::{ProviderConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::error::ProviderError;
use crate::utils::log_preview;

/// Gemini generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Tool declaration; only search grounding is used
#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<Citation>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, thought parts excluded
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();

        (!text.is_empty()).then_some(text)
    }

    /// Citation chunks of the first candidate, empty when absent
    fn into_citations(self) -> Vec<Citation> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.grounding_metadata)
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
    }
}

/// Gemini provider client
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client for the default endpoint and model
    pub fn new(api_key: impl Into<String>) -> ProviderResult<Self> {
        Self::with_base_url(DEFAULT_ENDPOINT, DEFAULT_MODEL, api_key, Duration::from_secs(120))
    }

    /// Create a client from provider configuration
    pub fn from_config(config: &ProviderConfig) -> ProviderResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ProviderError::Config("no API key configured".to_string()))?;

        Self::with_base_url(
            &config.endpoint,
            &config.model,
            api_key,
            config.request_timeout(),
        )
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(
        endpoint: &str,
        model: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::Config("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("sonicpulse/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        })
    }

    /// Model every request is sent to
    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    /// Send one generateContent request
    async fn generate(&self, request: &GenerateRequest<'_>) -> ProviderResult<GenerateResponse> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                body = log_preview(&body, 200),
                "Gemini request failed"
            );
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(
                "Failed to decode Gemini response: {}. Body truncated: {}",
                e,
                log_preview(&body, 200)
            );
            ProviderError::InvalidResponse(e.to_string())
        })
    }

    fn request<'a>(prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            tools: Vec::new(),
            generation_config: None,
        }
    }
}

#[async_trait]
impl Provider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_grounded(&self, prompt: &str) -> ProviderResult<GroundedResponse> {
        let mut request = Self::request(prompt);
        request.tools.push(Tool {
            google_search: GoogleSearch {},
        });

        let response = self.generate(&request).await?;
        let text = response.text().ok_or(ProviderError::EmptyResponse)?;
        let citations = response.into_citations();

        tracing::debug!(
            chars = text.len(),
            citations = citations.len(),
            "Grounded generation finished"
        );

        Ok(GroundedResponse { text, citations })
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> ProviderResult<String> {
        let mut request = Self::request(prompt);
        request.generation_config = Some(GenerationConfig {
            response_mime_type: "application/json",
            response_schema: schema,
        });

        let response = self.generate(&request).await?;
        response.text().ok_or(ProviderError::EmptyResponse)
    }

    async fn generate_free(&self, prompt: &str) -> ProviderResult<String> {
        let response = self.generate(&Self::request(prompt)).await?;
        response.text().ok_or(ProviderError::EmptyResponse)
    }
}
