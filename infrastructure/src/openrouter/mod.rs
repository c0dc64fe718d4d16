//! OpenRouter adapter: chat gateway and wire protocol

pub mod gateway;
pub mod protocol;

pub use gateway::{DEFAULT_CHAT_URL, OpenRouterGateway};
