//! OpenAI adapter - `ChatModel` implementation over the chat-completions API.
//!
//! One `complete` call is one HTTP request. Failures come back as classified
//! `ModelError`s; the caller decides whether and when to retry.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(15));
//!
//! let model = OpenAIChatModel::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{ChatModel, ChatRole, CompletionRequest, ModelError};

/// Configuration for the OpenAI adapter.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI chat-completions client.
pub struct OpenAIChatModel {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIChatModel {
    /// Creates a new client with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        messages.push(OpenAIMessage {
            role: "system".to_string(),
            content: request.system_prompt.clone(),
        });

        for msg in &request.messages {
            messages.push(OpenAIMessage {
                role: match msg.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Sends the request, mapping transport failures.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, ModelError> {
        let openai_request = self.to_openai_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout
                } else if e.is_connect() {
                    ModelError::connection(format!("connection failed: {}", e))
                } else {
                    ModelError::connection(e.to_string())
                }
            })
    }

    /// Classifies non-success statuses into the error taxonomy.
    async fn handle_response_status(response: Response) -> Result<Response, ModelError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(ModelError::Authentication),
            400 => Err(ModelError::bad_request(error_message(&error_body))),
            429 => Err(ModelError::RateLimited),
            code => Err(ModelError::Status { status: code }),
        }
    }

    /// Pulls the first choice's text out of a success response.
    async fn parse_response(response: Response) -> Result<String, ModelError> {
        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ModelError::parse(format!("failed to decode response: {}", e)))?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::parse("no choices in response"))?;

        Ok(choice.message.content.trim().to_string())
    }
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        let response = self.send_request(request).await?;
        let response = Self::handle_response_status(response).await?;
        Self::parse_response(response).await
    }
}

/// Digs the human-readable message out of an OpenAI error body, falling
/// back to the raw body.
fn error_message(error_body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|parsed| {
            parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| error_body.trim().to_string())
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}
