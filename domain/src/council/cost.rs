//! Monetary cost computation
//!
//! Pure arithmetic over per-million-token prices. Price lookup itself is a
//! collaborator concern (see the application layer's `PricingSource` port);
//! unknown models simply price at zero.

use serde::{Deserialize, Serialize};

/// Prompt/completion prices per one million tokens, in USD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelPrice {
    pub prompt_per_million: f64,
    pub completion_per_million: f64,
}

impl ModelPrice {
    /// The free price used for unknown models
    pub const ZERO: ModelPrice = ModelPrice {
        prompt_per_million: 0.0,
        completion_per_million: 0.0,
    };

    pub fn new(prompt_per_million: f64, completion_per_million: f64) -> Self {
        Self {
            prompt_per_million,
            completion_per_million,
        }
    }

    pub fn is_free(&self) -> bool {
        self.prompt_per_million == 0.0 && self.completion_per_million == 0.0
    }
}

/// Cost of one call in USD, rounded to 6 decimal places
pub fn request_cost(price: ModelPrice, prompt_tokens: u64, completion_tokens: u64) -> f64 {
    let cost = prompt_tokens as f64 / 1_000_000.0 * price.prompt_per_million
        + completion_tokens as f64 / 1_000_000.0 * price.completion_per_million;
    round_currency(cost)
}

/// Round a USD amount to 6 decimal places
pub fn round_currency(amount: f64) -> f64 {
    (amount * 1_000_000.0).round() / 1_000_000.0
}
