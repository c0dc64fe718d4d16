//! Council configuration

use crate::ports::llm_gateway::DEFAULT_QUERY_TIMEOUT;
use council_domain::Model;
use std::time::Duration;

/// Configuration for council runs
///
/// The roster order matters: stage-1 entries, and therefore the anonymized
/// labels, follow it.
#[derive(Debug, Clone)]
pub struct CouncilConfig {
    /// Council members queried in stages 1 and 2
    pub models: Vec<Model>,
    /// Chairman model - synthesizes the final answer in stage 3
    pub chairman: Model,
    /// Model used for conversation-title generation
    pub title_model: Model,
    /// Per-call timeout for council queries
    pub query_timeout: Duration,
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            models: Model::default_council(),
            chairman: Model::default_chairman(),
            title_model: Model::default_title_model(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

impl CouncilConfig {
    pub fn new(models: Vec<Model>, chairman: Model) -> Self {
        Self {
            models,
            chairman,
            ..Default::default()
        }
    }

    pub fn with_title_model(mut self, model: Model) -> Self {
        self.title_model = model;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }
}
