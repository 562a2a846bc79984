//! Scripted provider for tests and offline runs
//!
//! Each generation kind pops its next scripted answer from a queue; an empty
//! queue answers with [`ProviderError::EmptyResponse`]. Every call is
//! recorded so tests can assert on the prompts that were sent.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Citation, GroundedResponse, Provider, ProviderResult};
use crate::error::ProviderError;

/// A call received by the stub
#[derive(Debug, Clone, PartialEq)]
pub enum StubCall {
    Grounded { prompt: String },
    Structured { prompt: String, schema: serde_json::Value },
    Free { prompt: String },
}

impl StubCall {
    /// Prompt text of the call
    pub fn prompt(&self) -> &str {
        match self {
            Self::Grounded { prompt } | Self::Structured { prompt, .. } | Self::Free { prompt } => {
                prompt
            }
        }
    }
}

/// Provider answering from scripted queues
#[derive(Default)]
pub struct StubProvider {
    grounded: Mutex<VecDeque<ProviderResult<GroundedResponse>>>,
    structured: Mutex<VecDeque<ProviderResult<String>>>,
    free: Mutex<VecDeque<ProviderResult<String>>>,
    calls: Mutex<Vec<StubCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl StubProvider {
    /// Create a stub with empty queues
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a grounded answer
    pub fn with_grounded(self, text: impl Into<String>, citations: Vec<Citation>) -> Self {
        lock(&self.grounded).push_back(Ok(GroundedResponse {
            text: text.into(),
            citations,
        }));
        self
    }

    /// Queue a grounded failure
    pub fn with_grounded_error(self, error: ProviderError) -> Self {
        lock(&self.grounded).push_back(Err(error));
        self
    }

    /// Queue a structured answer (raw JSON text)
    pub fn with_structured(self, json: impl Into<String>) -> Self {
        lock(&self.structured).push_back(Ok(json.into()));
        self
    }

    /// Queue a structured failure
    pub fn with_structured_error(self, error: ProviderError) -> Self {
        lock(&self.structured).push_back(Err(error));
        self
    }

    /// Queue a free-text answer
    pub fn with_free(self, text: impl Into<String>) -> Self {
        lock(&self.free).push_back(Ok(text.into()));
        self
    }

    /// Queue a free-text failure
    pub fn with_free_error(self, error: ProviderError) -> Self {
        lock(&self.free).push_back(Err(error));
        self
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> Vec<StubCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    fn record(&self, call: StubCall) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl Provider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate_grounded(&self, prompt: &str) -> ProviderResult<GroundedResponse> {
        self.record(StubCall::Grounded {
            prompt: prompt.to_string(),
        });
        lock(&self.grounded)
            .pop_front()
            .unwrap_or(Err(ProviderError::EmptyResponse))
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> ProviderResult<String> {
        self.record(StubCall::Structured {
            prompt: prompt.to_string(),
            schema: schema.clone(),
        });
        lock(&self.structured)
            .pop_front()
            .unwrap_or(Err(ProviderError::EmptyResponse))
    }

    async fn generate_free(&self, prompt: &str) -> ProviderResult<String> {
        self.record(StubCall::Free {
            prompt: prompt.to_string(),
        });
        lock(&self.free)
            .pop_front()
            .unwrap_or(Err(ProviderError::EmptyResponse))
    }
}
