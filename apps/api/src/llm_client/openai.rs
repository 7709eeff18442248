//! OpenAI Responses API backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{api_error, http_client, GenerativeModel, LlmError};

const OPENAI_RESPONSES_URL: &str = "https://api.openai.com/v1/responses";

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub output: Vec<OutputItem>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
pub struct OutputContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl ResponsesResponse {
    /// Concatenates every `output_text` block across all message items.
    pub fn into_text(self) -> Result<String, LlmError> {
        let text: String = self
            .output
            .into_iter()
            .filter(|item| item.item_type == "message")
            .flat_map(|item| item.content)
            .filter(|c| c.content_type == "output_text")
            .filter_map(|c| c.text)
            .collect();

        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl GenerativeModel for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ResponsesRequest {
            model: &self.model,
            input: prompt,
        };

        let response = self
            .client
            .post(OPENAI_RESPONSES_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), body));
        }

        let parsed: ResponsesResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "OpenAI call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        parsed.into_text()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
