//! Generate Title use case
//!
//! Produces a short conversation title from the first user message using a
//! fast, cheap model. Never fails: any gateway problem falls back to a
//! generic title.

use crate::ports::llm_gateway::LlmGateway;
use council_domain::{Message, Model, PromptTemplate, Question};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Title calls are cheap and should not hold up conversation creation
pub const TITLE_TIMEOUT: Duration = Duration::from_secs(30);

const FALLBACK_TITLE: &str = "New Conversation";
const MAX_TITLE_CHARS: usize = 50;

/// Use case for generating a conversation title
pub struct GenerateTitleUseCase<G> {
    gateway: Arc<G>,
    model: Model,
}

impl<G: LlmGateway> GenerateTitleUseCase<G> {
    pub fn new(gateway: Arc<G>, model: Model) -> Self {
        Self { gateway, model }
    }

    pub async fn execute(&self, question: &Question) -> String {
        let messages = vec![Message::user(PromptTemplate::title_prompt(question))];

        match self.gateway.query(&self.model, &messages, TITLE_TIMEOUT).await {
            Ok(completion) => tidy_title(&completion.content),
            Err(e) => {
                warn!("Title generation via {} failed: {}", self.model, e);
                FALLBACK_TITLE.to_string()
            }
        }
    }
}

/// Strip quotes and whitespace, cap the length
fn tidy_title(raw: &str) -> String {
    let title = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();

    if title.is_empty() {
        return FALLBACK_TITLE.to_string();
    }

    if title.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
        return format!("{truncated}...");
    }

    title.to_string()
}
