//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod openrouter;
pub mod pricing;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileCouncilConfig, FileOpenRouterConfig};
pub use openrouter::{DEFAULT_CHAT_URL, OpenRouterGateway};
pub use pricing::{DEFAULT_MODELS_URL, DEFAULT_PRICING_TTL, PriceBook};
