//! Pricing port
//!
//! Read-only access to per-model prices. The backing store is expected to
//! be a time-cached snapshot of the endpoint's pricing listing; the
//! orchestrator only ever reads it.

use async_trait::async_trait;
use council_domain::{Model, ModelPrice};

/// Source of per-million-token prices
///
/// Lookup never fails: unknown models price at [`ModelPrice::ZERO`], so a
/// missing or stale price sheet degrades to zero-cost accounting rather
/// than an error.
#[async_trait]
pub trait PricingSource: Send + Sync {
    async fn price(&self, model: &Model) -> ModelPrice;
}
