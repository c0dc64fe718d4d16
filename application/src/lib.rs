//! Application layer for llm-council
//!
//! This crate contains use cases, port definitions, and the fan-out
//! executor. It depends only on the domain layer.

pub mod config;
pub mod fan_out;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::CouncilConfig;
pub use fan_out::fan_out;
pub use ports::{
    llm_gateway::{ChatCompletion, DEFAULT_QUERY_TIMEOUT, GatewayError, LlmGateway},
    pricing::PricingSource,
};
pub use use_cases::generate_title::GenerateTitleUseCase;
pub use use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
