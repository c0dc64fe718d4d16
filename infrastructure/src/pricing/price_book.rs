//! Time-cached model pricing
//!
//! The serving endpoint publishes a listing of models with per-token
//! prices. `PriceBook` snapshots that listing and refreshes it on a TTL;
//! a failed refresh keeps serving the stale snapshot, because a slightly
//! outdated price beats a zeroed cost report.

use crate::openrouter::protocol::ModelListResponse;
use async_trait::async_trait;
use council_application::ports::pricing::PricingSource;
use council_domain::{Model, ModelPrice};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Default models/pricing listing endpoint
pub const DEFAULT_MODELS_URL: &str = "https://openrouter.ai/api/v1/models";

/// Default snapshot lifetime (1 hour)
pub const DEFAULT_PRICING_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Default)]
struct CacheState {
    prices: HashMap<String, ModelPrice>,
    fetched_at: Option<Instant>,
}

impl CacheState {
    /// A snapshot is fresh when it holds data younger than `ttl`
    fn is_fresh(&self, ttl: Duration) -> bool {
        !self.prices.is_empty()
            && self
                .fetched_at
                .is_some_and(|at| at.elapsed() < ttl)
    }
}

/// TTL-cached price sheet backed by the remote models listing
pub struct PriceBook {
    client: reqwest::Client,
    url: String,
    ttl: Duration,
    cache: RwLock<CacheState>,
}

impl PriceBook {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_MODELS_URL, DEFAULT_PRICING_TTL)
    }

    pub fn with_endpoint(url: impl Into<String>, ttl: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            ttl,
            cache: RwLock::new(CacheState::default()),
        }
    }

    /// A price book seeded with a fixed sheet, counted as freshly fetched
    ///
    /// Useful offline and in tests; the sheet still expires after `ttl`.
    pub fn preloaded(
        prices: impl IntoIterator<Item = (Model, ModelPrice)>,
        ttl: Duration,
    ) -> Self {
        let prices = prices
            .into_iter()
            .map(|(model, price)| (model.to_string(), price))
            .collect();
        Self {
            client: reqwest::Client::new(),
            url: DEFAULT_MODELS_URL.to_string(),
            ttl,
            cache: RwLock::new(CacheState {
                prices,
                fetched_at: Some(Instant::now()),
            }),
        }
    }

    /// Refresh the snapshot if it has expired; stale data survives failure
    async fn ensure_fresh(&self) {
        if self.cache.read().await.is_fresh(self.ttl) {
            return;
        }

        let mut cache = self.cache.write().await;
        // Another caller may have refreshed while we waited for the lock
        if cache.is_fresh(self.ttl) {
            return;
        }

        match self.fetch_listing().await {
            Ok(prices) => {
                info!("Refreshed pricing for {} models", prices.len());
                cache.prices = prices;
                cache.fetched_at = Some(Instant::now());
            }
            Err(e) => {
                warn!("Failed to refresh model prices: {e}; serving stale data");
            }
        }
    }

    async fn fetch_listing(&self) -> Result<HashMap<String, ModelPrice>, reqwest::Error> {
        let listing: ModelListResponse = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(listing
            .data
            .into_iter()
            .map(|entry| {
                let price = entry.pricing.to_model_price();
                (entry.id, price)
            })
            .collect())
    }
}

impl Default for PriceBook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PricingSource for PriceBook {
    async fn price(&self, model: &Model) -> ModelPrice {
        self.ensure_fresh().await;
        self.cache
            .read()
            .await
            .prices
            .get(model.as_str())
            .copied()
            .unwrap_or(ModelPrice::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_preloaded_lookup() {
        let book = PriceBook::preloaded(
            [(Model::new("openai/gpt-4o"), ModelPrice::new(2.5, 10.0))],
            DEFAULT_PRICING_TTL,
        );
        let price = book.price(&Model::new("openai/gpt-4o")).await;
        assert_eq!(price, ModelPrice::new(2.5, 10.0));
    }

    #[tokio::test]
    async fn test_unknown_model_is_free() {
        let book = PriceBook::preloaded(
            [(Model::new("openai/gpt-4o"), ModelPrice::new(2.5, 10.0))],
            DEFAULT_PRICING_TTL,
        );
        assert!(book.price(&Model::new("no/such-model")).await.is_free());
    }

    #[test]
    fn test_empty_cache_is_never_fresh() {
        let state = CacheState::default();
        assert!(!state.is_fresh(DEFAULT_PRICING_TTL));

        // Even with a timestamp, an empty sheet forces a refetch
        let state = CacheState {
            prices: HashMap::new(),
            fetched_at: Some(Instant::now()),
        };
        assert!(!state.is_fresh(DEFAULT_PRICING_TTL));
    }

    #[test]
    fn test_snapshot_expires_after_ttl() {
        let prices = HashMap::from([("m".to_string(), ModelPrice::ZERO)]);
        let fresh = CacheState {
            prices: prices.clone(),
            fetched_at: Some(Instant::now()),
        };
        assert!(fresh.is_fresh(Duration::from_secs(60)));

        let stale = CacheState {
            prices,
            fetched_at: Instant::now().checked_sub(Duration::from_secs(120)),
        };
        assert!(!stale.is_fresh(Duration::from_secs(60)));
    }
}
