//! Configuration file schema
//!
//! Example configuration:
//!
//! ```toml
//! [council]
//! models = ["openai/gpt-4o", "google/gemini-flash-1.5"]
//! chairman = "google/gemini-flash-1.5"
//!
//! [openrouter]
//! timeout_secs = 120
//! pricing_ttl_secs = 3600
//! ```

use council_application::CouncilConfig;
use council_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root of the TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub council: FileCouncilConfig,
    pub openrouter: FileOpenRouterConfig,
}

/// `[council]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Council roster; empty means the built-in default roster
    pub models: Vec<String>,
    /// Chairman model for synthesis
    pub chairman: Option<String>,
    /// Model used for conversation-title generation
    pub title_model: Option<String>,
}

/// `[openrouter]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenRouterConfig {
    /// Chat-completions endpoint
    pub chat_url: String,
    /// Models/pricing listing endpoint
    pub models_url: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Pricing snapshot lifetime in seconds
    pub pricing_ttl_secs: u64,
}

impl Default for FileOpenRouterConfig {
    fn default() -> Self {
        Self {
            chat_url: crate::openrouter::DEFAULT_CHAT_URL.to_string(),
            models_url: crate::pricing::DEFAULT_MODELS_URL.to_string(),
            timeout_secs: 120,
            pricing_ttl_secs: 3600,
        }
    }
}

impl FileConfig {
    /// Build the application-layer council configuration
    ///
    /// Unset fields fall back to the built-in defaults.
    pub fn council_config(&self) -> CouncilConfig {
        let mut config = CouncilConfig::default();

        if !self.council.models.is_empty() {
            config.models = self
                .council
                .models
                .iter()
                .map(|id| Model::new(id.clone()))
                .collect();
        }
        if let Some(chairman) = &self.council.chairman {
            config.chairman = Model::new(chairman.clone());
        }
        if let Some(title_model) = &self.council.title_model {
            config.title_model = Model::new(title_model.clone());
        }
        config.query_timeout = Duration::from_secs(self.openrouter.timeout_secs);

        config
    }

    pub fn pricing_ttl(&self) -> Duration {
        Duration::from_secs(self.openrouter.pricing_ttl_secs)
    }
}
