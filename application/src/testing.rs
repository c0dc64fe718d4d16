//! Shared test doubles for the application layer

use crate::ports::llm_gateway::{ChatCompletion, GatewayError, LlmGateway};
use crate::ports::pricing::PricingSource;
use async_trait::async_trait;
use council_domain::{Message, Model, ModelPrice};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted gateway: replies are queued per model and popped per call
///
/// An unscripted call fails with a connection error, which makes missing
/// expectations visible in test output.
pub struct MockGateway {
    scripts: Mutex<HashMap<String, VecDeque<Result<ChatCompletion, GatewayError>>>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
        }
    }

    /// Queue the next reply for `model`
    pub fn script(&self, model: &str, reply: Result<ChatCompletion, GatewayError>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Delay every call to `model` (pairs with `start_paused` tests)
    pub fn set_delay(&self, model: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(model.to_string(), delay);
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn query(
        &self,
        model: &Model,
        _messages: &[Message],
        _timeout: Duration,
    ) -> Result<ChatCompletion, GatewayError> {
        let delay = self.delays.lock().unwrap().get(model.as_str()).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.scripts
            .lock()
            .unwrap()
            .get_mut(model.as_str())
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(GatewayError::Connection(format!(
                    "no scripted reply for {model}"
                )))
            })
    }
}

/// Fixed price sheet
pub struct StaticPricing {
    prices: HashMap<String, ModelPrice>,
}

impl StaticPricing {
    pub fn empty() -> Self {
        Self {
            prices: HashMap::new(),
        }
    }

    pub fn with(mut self, model: &str, prompt: f64, completion: f64) -> Self {
        self.prices
            .insert(model.to_string(), ModelPrice::new(prompt, completion));
        self
    }
}

#[async_trait]
impl PricingSource for StaticPricing {
    async fn price(&self, model: &Model) -> ModelPrice {
        self.prices
            .get(model.as_str())
            .copied()
            .unwrap_or(ModelPrice::ZERO)
    }
}
