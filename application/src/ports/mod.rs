//! Ports (interfaces) implemented by the infrastructure layer

pub mod llm_gateway;
pub mod pricing;

pub use llm_gateway::{ChatCompletion, DEFAULT_QUERY_TIMEOUT, GatewayError, LlmGateway};
pub use pricing::PricingSource;
