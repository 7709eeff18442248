//! LLM Client — the single point of entry for all generative-model calls.
//!
//! ARCHITECTURAL RULE: No other module may call a model provider's HTTP API directly.
//! All LLM interactions MUST go through a `GenerativeModel` built here.
//!
//! Each analysis is exactly one call: no retries, no streaming.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{Config, LlmProvider};

pub mod gemini;
pub mod openai;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Prompt was blocked by the model service: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A text-completion service. Takes a prompt, returns markdown.
///
/// Carried in `AppState` as `Arc<dyn GenerativeModel>` so tests can swap in a fake.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider-specific model identifier, for logs and `/health`.
    fn model_name(&self) -> &str;
}

/// Builds the model client selected by `config`.
pub fn build_model(config: &Config) -> Result<Arc<dyn GenerativeModel>, LlmError> {
    let model: Arc<dyn GenerativeModel> = match config.llm_provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(
            config.llm_api_key.clone(),
            config.llm_model.clone(),
        )?),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(
            config.llm_api_key.clone(),
            config.llm_model.clone(),
        )?),
    };
    Ok(model)
}

fn http_client() -> Result<Client, LlmError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Error envelope shared by both providers: `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Turns a non-2xx body into `LlmError::Api`, preferring the service's own message.
fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}
