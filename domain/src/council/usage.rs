//! Token usage accounting

use serde::{Deserialize, Serialize};

/// Token counters reported by the serving endpoint for one call
///
/// Counters missing from a response default to zero; failed calls carry an
/// all-zero usage unless the endpoint billed tokens anyway (e.g. a response
/// with empty content).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64, total_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }

    /// Add another usage record into this one
    pub fn add(&mut self, other: &TokenUsage) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(other.prompt_tokens);
        self.completion_tokens = self
            .completion_tokens
            .saturating_add(other.completion_tokens);
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
    }

    pub fn is_zero(&self) -> bool {
        self.prompt_tokens == 0 && self.completion_tokens == 0 && self.total_tokens == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        assert!(TokenUsage::default().is_zero());
    }

    #[test]
    fn test_add_accumulates() {
        let mut total = TokenUsage::default();
        total.add(&TokenUsage::new(10, 20, 30));
        total.add(&TokenUsage::new(1, 2, 3));
        assert_eq!(total, TokenUsage::new(11, 22, 33));
    }

    #[test]
    fn test_missing_counters_deserialize_to_zero() {
        let usage: TokenUsage = serde_json::from_str(r#"{"prompt_tokens": 5}"#).unwrap();
        assert_eq!(usage, TokenUsage::new(5, 0, 0));
    }
}
