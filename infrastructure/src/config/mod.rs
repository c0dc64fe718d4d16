//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{FileConfig, FileCouncilConfig, FileOpenRouterConfig};
pub use loader::ConfigLoader;
