use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::app_config::ModelConfig;
use crate::errors::TranslationError;
use crate::providers::TranslationClient;

/// Generation-length ceiling for every completion request
const MAX_COMPLETION_TOKENS: u32 = 4096;

/// OpenAI-compatible client for chat-completion endpoints
#[derive(Debug)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// Resolved endpoint/credential/model configuration
    config: ModelConfig,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,

    /// Maximum number of tokens to generate
    max_tokens: u32,
}

/// Chat message format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// The returned completion choices
    pub choices: Vec<ChatChoice>,
}

/// A single completion choice in a chat response
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatMessage,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            max_tokens,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }
}

impl OpenAI {
    /// Create a new client from a resolved model configuration
    pub fn new(config: ModelConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    /// Validate that an endpoint string parses as an HTTP(S) URL
    pub fn validate_endpoint(endpoint: &str) -> Result<(), TranslationError> {
        if endpoint.is_empty() {
            return Err(TranslationError::Configuration(
                "API endpoint is not configured".to_string(),
            ));
        }
        let url = Url::parse(endpoint)
            .map_err(|e| TranslationError::Configuration(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(TranslationError::Configuration(format!(
                "Unsupported endpoint scheme '{}' in '{}'",
                other, endpoint
            ))),
        }
    }

    /// URL of the chat-completions resource under the configured endpoint
    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl TranslationClient for OpenAI {
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, TranslationError> {
        if self.config.api_key.is_empty() {
            return Err(TranslationError::Configuration(
                "API key is not configured; set it in the configuration file or per request"
                    .to_string(),
            ));
        }
        Self::validate_endpoint(&self.config.endpoint)?;

        let request = ChatRequest::new(&self.config.model, MAX_COMPLETION_TOKENS)
            .add_message("system", system_prompt)
            .add_message("user", user_text);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response body".to_string());
            error!("Translation API error ({}): {}", status, detail);
            return Err(match status {
                StatusCode::UNAUTHORIZED => TranslationError::Authentication(detail),
                StatusCode::TOO_MANY_REQUESTS => TranslationError::RateLimit(detail),
                _ => TranslationError::Service(format!("{}: {}", status, detail)),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Service(format!("Failed to parse API response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| TranslationError::Service("API response contained no choices".to_string()))
    }
}
