//! LLM Gateway port
//!
//! Defines the interface for communicating with the remote model-serving
//! endpoint. The gateway sends exactly one request per call and never
//! retries; retry and degrade policies belong to the orchestrator.

use async_trait::async_trait;
use council_domain::{Message, Model, TokenUsage};
use std::time::Duration;
use thiserror::Error;

/// Default per-call timeout for council queries
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors that can occur during a gateway call
///
/// Transport failures (the request never produced a usable payload) and
/// semantic failures (a 2xx response whose payload is unusable) are
/// distinct variants so callers can tell them apart; the orchestrator
/// treats both as a per-model failure.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Invalid response structure: {0}")]
    Malformed(String),

    #[error("Model returned empty response")]
    EmptyResponse {
        /// Tokens the endpoint billed despite the empty content
        usage: TokenUsage,
    },
}

impl GatewayError {
    /// Usage that survived the failure, if any
    pub fn usage(&self) -> TokenUsage {
        match self {
            GatewayError::EmptyResponse { usage } => *usage,
            _ => TokenUsage::default(),
        }
    }

    /// Whether the request itself failed, as opposed to a well-formed
    /// response with unusable content
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GatewayError::Connection(_) | GatewayError::Timeout | GatewayError::Status { .. }
        )
    }
}

/// A successful chat completion
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub content: String,
    pub usage: TokenUsage,
}

/// Gateway for chat-style model calls
///
/// This port defines how the application layer reaches remote models.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one chat request to one model
    ///
    /// A returned `ChatCompletion` always has non-empty content; every
    /// other outcome is a `GatewayError`.
    async fn query(
        &self,
        model: &Model,
        messages: &[Message],
        timeout: Duration,
    ) -> Result<ChatCompletion, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(GatewayError::Timeout.is_transport());
        assert!(
            GatewayError::Status {
                code: 429,
                message: "rate limited".into()
            }
            .is_transport()
        );
        assert!(!GatewayError::Malformed("no choices".into()).is_transport());
        assert!(
            !GatewayError::EmptyResponse {
                usage: TokenUsage::default()
            }
            .is_transport()
        );
    }

    #[test]
    fn test_empty_response_keeps_usage() {
        let err = GatewayError::EmptyResponse {
            usage: TokenUsage::new(42, 0, 42),
        };
        assert_eq!(err.usage().prompt_tokens, 42);
        assert_eq!(err.to_string(), "Model returned empty response");
    }
}
