//! Remote text-generation client.
//!
//! One operation: a single user prompt in, the first text segment of the
//! response out. The trait exists so the quiz flow can be exercised against
//! a mock without a live endpoint.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

pub mod types;

use crate::config::Config;
use crate::errors::ApiError;
use types::{ErrorResponse, GenerateRequest, GenerateResponse, Message};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Trait abstraction over the text-generation API, enabling test mocking.
#[async_trait]
pub trait TextGenClient: Send + Sync {
    /// Send one prompt and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;
}

/// Client for the Anthropic Messages API.
///
/// Constructed per dispatch from the current credential plus configuration;
/// no process-wide client state exists. The underlying HTTP client carries
/// no request timeout: a dispatched call runs until it completes or the
/// library reports an error.
pub struct AnthropicClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: usize,
}

impl AnthropicClient {
    pub fn new(config: &Config, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    fn url(&self) -> String {
        format!("{}/v1/messages", self.endpoint)
    }
}

#[async_trait]
impl TextGenClient for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message::user(prompt)],
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "Sending generation request");

        let response = self
            .http
            .post(self.url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the API's own error message when the body parses.
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(ApiError::Authentication(message));
            }
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        debug!(
            stop_reason = generated.stop_reason.as_deref().unwrap_or("unknown"),
            "Generation response received"
        );

        generated
            .first_text()
            .map(str::to_string)
            .ok_or(ApiError::EmptyResponse)
    }
}
