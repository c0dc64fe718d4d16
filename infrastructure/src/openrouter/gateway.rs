//! OpenRouter gateway adapter
//!
//! Implements the application layer's `LlmGateway` port over the
//! OpenRouter-compatible chat-completions endpoint. One HTTP request per
//! call, no retries; every failure is normalized into the port's error
//! taxonomy so the orchestrator can fold it into a per-model result.

use super::protocol::{ChatCompletionRequest, ChatCompletionResponse, ErrorResponse};
use async_trait::async_trait;
use council_application::ports::llm_gateway::{ChatCompletion, GatewayError, LlmGateway};
use council_domain::{Message, Model, TokenUsage};
use std::time::Duration;
use tracing::debug;

/// Default chat-completions endpoint
pub const DEFAULT_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Bytes of raw body echoed into debug logs
const LOG_BODY_LIMIT: usize = 500;

/// Gateway to an OpenRouter-compatible serving endpoint
pub struct OpenRouterGateway {
    client: reqwest::Client,
    api_key: String,
    chat_url: String,
}

impl OpenRouterGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            chat_url: DEFAULT_CHAT_URL.to_string(),
        }
    }

    /// Point the gateway at a non-default endpoint (proxies, test servers)
    pub fn with_chat_url(mut self, url: impl Into<String>) -> Self {
        self.chat_url = url.into();
        self
    }

    /// Best error message for a non-2xx response: the provider's error
    /// envelope when parseable, otherwise a body excerpt
    fn status_message(body: &str) -> String {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(envelope) => envelope.error.message,
            Err(_) => excerpt(body, 100).to_string(),
        }
    }
}

#[async_trait]
impl LlmGateway for OpenRouterGateway {
    async fn query(
        &self,
        model: &Model,
        messages: &[Message],
        timeout: Duration,
    ) -> Result<ChatCompletion, GatewayError> {
        let request = ChatCompletionRequest::new(model, messages);

        let response = self
            .client
            .post(&self.chat_url)
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::Connection(e.to_string())
            }
        })?;

        debug!("Raw response from {}: {}", model, excerpt(&body, LOG_BODY_LIMIT));

        if !status.is_success() {
            return Err(GatewayError::Status {
                code: status.as_u16(),
                message: Self::status_message(&body),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Malformed(format!("failed to parse response: {e}")))?;

        let usage: TokenUsage = parsed.usage.map(Into::into).unwrap_or_default();

        let Some(choice) = parsed.choices.into_iter().next() else {
            return Err(GatewayError::Malformed("no choices".to_string()));
        };

        let content = choice
            .message
            .and_then(|m| m.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(GatewayError::EmptyResponse { usage });
        }

        Ok(ChatCompletion { content, usage })
    }
}

/// Char-boundary-safe prefix of `text`
fn excerpt(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
