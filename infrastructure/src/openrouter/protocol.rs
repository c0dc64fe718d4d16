//! Wire types for the OpenRouter-compatible API
//!
//! Covers the two endpoints this system consumes: chat completions and the
//! model/pricing listing. Response shapes are deliberately loose (optional
//! fields, defaults) because providers fill them inconsistently; the
//! gateway decides what counts as a usable reply.

use council_domain::{Message, Model, ModelPrice, TokenUsage};
use serde::{Deserialize, Serialize};

/// Request body for the chat-completions endpoint
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl ChatCompletionRequest {
    pub fn new(model: &Model, messages: &[Message]) -> Self {
        Self {
            model: model.to_string(),
            messages: messages.to_vec(),
        }
    }
}

/// Response body for the chat-completions endpoint
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

/// Token counters as the endpoint reports them; any missing counter is zero
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl From<WireUsage> for TokenUsage {
    fn from(wire: WireUsage) -> Self {
        TokenUsage::new(wire.prompt_tokens, wire.completion_tokens, wire.total_tokens)
    }
}

/// Error envelope returned on non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Response body for the models listing endpoint
#[derive(Debug, Deserialize)]
pub struct ModelListResponse {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    #[serde(default)]
    pub pricing: WirePricing,
}

/// Listing prices arrive as per-token decimal strings
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WirePricing {
    pub prompt: String,
    pub completion: String,
}

impl WirePricing {
    /// Convert per-token string prices to per-million-token prices
    ///
    /// Unparseable or missing prices read as zero, matching the pricing
    /// contract that unknown models are free.
    pub fn to_model_price(&self) -> ModelPrice {
        ModelPrice::new(
            per_million(&self.prompt),
            per_million(&self.completion),
        )
    }
}

fn per_million(per_token: &str) -> f64 {
    per_token.parse::<f64>().unwrap_or(0.0) * 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_roles_lowercase() {
        let request = ChatCompletionRequest::new(
            &Model::new("openai/gpt-4o"),
            &[Message::user("hello")],
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "openai/gpt-4o");
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_parse_successful_completion() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Hi there"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let usage: TokenUsage = response.usage.unwrap().into();
        assert_eq!(usage.total_tokens, 16);
        assert_eq!(
            response.choices[0].message.as_ref().unwrap().content.as_deref(),
            Some("Hi there")
        );
    }

    #[test]
    fn test_parse_response_without_choices_or_usage() {
        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(response.choices.is_empty());
        assert!(response.usage.is_none());
    }

    #[test]
    fn test_parse_partial_usage() {
        let body = r#"{"choices": [], "usage": {"prompt_tokens": 7}}"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let usage: TokenUsage = response.usage.unwrap().into();
        assert_eq!(usage, TokenUsage::new(7, 0, 0));
    }

    #[test]
    fn test_parse_error_envelope() {
        let body = r#"{"error": {"message": "Insufficient credits", "code": 402}}"#;
        let response: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.error.message, "Insufficient credits");
    }

    #[test]
    fn test_pricing_strings_convert_to_per_million() {
        let listing = r#"{
            "data": [
                {"id": "openai/gpt-4o", "pricing": {"prompt": "0.0000025", "completion": "0.00001"}},
                {"id": "free/model", "pricing": {"prompt": "0", "completion": "0"}},
                {"id": "weird/model", "pricing": {"prompt": "n/a", "completion": ""}}
            ]
        }"#;
        let response: ModelListResponse = serde_json::from_str(listing).unwrap();

        let gpt = response.data[0].pricing.to_model_price();
        assert!((gpt.prompt_per_million - 2.5).abs() < 1e-9);
        assert!((gpt.completion_per_million - 10.0).abs() < 1e-9);

        assert!(response.data[1].pricing.to_model_price().is_free());
        assert!(response.data[2].pricing.to_model_price().is_free());
    }

    #[test]
    fn test_listing_entry_without_pricing_defaults_to_free() {
        let listing = r#"{"data": [{"id": "bare/model"}]}"#;
        let response: ModelListResponse = serde_json::from_str(listing).unwrap();
        assert!(response.data[0].pricing.to_model_price().is_free());
    }
}
