//! Model value object representing an LLM backend

use serde::{Deserialize, Serialize};

/// Identifier of a remote model (Value Object)
///
/// Models are addressed by provider-qualified identifiers as understood by
/// the serving endpoint, e.g. `openai/gpt-4o` or
/// `meta-llama/llama-3.2-3b-instruct:free`. The domain treats the identifier
/// as opaque; it only needs equality and display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Provider prefix of the identifier, if present
    ///
    /// E.g. `openai/gpt-4o` -> `openai`.
    pub fn provider(&self) -> Option<&str> {
        self.0.split_once('/').map(|(p, _)| p)
    }

    /// Default council roster
    pub fn default_council() -> Vec<Model> {
        vec![
            Model::new("google/gemini-flash-1.5"),
            Model::new("meta-llama/llama-3.2-3b-instruct:free"),
            Model::new("qwen/qwen-2-7b-instruct:free"),
        ]
    }

    /// Default chairman model - synthesizes the final answer
    pub fn default_chairman() -> Model {
        Model::new("google/gemini-flash-1.5")
    }

    /// Default model for conversation-title generation (fast and cheap)
    pub fn default_title_model() -> Model {
        Model::new("google/gemini-2.5-flash")
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::new(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model::new(s)
    }
}
