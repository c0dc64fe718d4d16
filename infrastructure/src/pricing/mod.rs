//! Pricing adapter

pub mod price_book;

pub use price_book::{DEFAULT_MODELS_URL, DEFAULT_PRICING_TTL, PriceBook};
