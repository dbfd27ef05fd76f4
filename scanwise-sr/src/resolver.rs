//! Resolution orchestrator
//!
//! Walks the tier chain for a single barcode in fixed order, stopping at
//! the first hit:
//!
//! `cache → durable store → nutrition API → cosmetics API → fallback table`
//!
//! The ordering encodes a policy: trust previously validated durable data
//! over live external data, and live external data over the compiled-in
//! table. Hits from below the cache are written back to the cache; hits
//! from the external tiers and the fallback table are also written back to
//! the durable store. A write-back failure never downgrades a successful
//! resolution.

use crate::cache::ProductCache;
use crate::sources::{ProductSink, ProductSource};
use scanwise_common::{Error, Product, Result};
use tracing::{info, warn};

/// The tier that produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Cache,
    DurableStore,
    NutritionApi,
    CosmeticsApi,
    Fallback,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Cache => "cache",
            Tier::DurableStore => "durable-store",
            Tier::NutritionApi => "nutrition-api",
            Tier::CosmeticsApi => "cosmetics-api",
            Tier::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful resolution and the tier that produced it
#[derive(Debug, Clone)]
pub struct Resolution {
    pub product: Product,
    pub tier: Tier,
}

/// Tiered barcode resolver.
///
/// Generic over the source implementations so tests can inject recording
/// fakes for every tier.
pub struct Resolver<S, N, C, F> {
    cache: ProductCache,
    store: S,
    nutrition: N,
    cosmetics: C,
    fallback: F,
}

impl<S, N, C, F> Resolver<S, N, C, F>
where
    S: ProductSource + ProductSink,
    N: ProductSource,
    C: ProductSource,
    F: ProductSource,
{
    pub fn new(cache: ProductCache, store: S, nutrition: N, cosmetics: C, fallback: F) -> Self {
        Self {
            cache,
            store,
            nutrition,
            cosmetics,
            fallback,
        }
    }

    /// Resolve a barcode through the tier chain.
    ///
    /// `Ok(None)` means every tier reported absence (including tiers that
    /// were unreachable; adapters absorb transport failures). An empty or
    /// whitespace barcode is rejected before any tier is consulted.
    pub async fn resolve(&self, barcode: &str) -> Result<Option<Resolution>> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(Error::InvalidInput("Barcode must not be empty".to_string()));
        }

        if let Some(product) = self.cache.get(barcode).await {
            info!(barcode = %barcode, tier = %Tier::Cache, "Product resolved");
            return Ok(Some(Resolution {
                product,
                tier: Tier::Cache,
            }));
        }

        if let Some(product) = self.store.resolve(barcode).await {
            // Already durable; only the cache needs populating
            self.cache.insert(product.clone()).await;
            return Ok(Some(self.hit(product, Tier::DurableStore)));
        }

        if let Some(product) = self.nutrition.resolve(barcode).await {
            self.write_back(&product).await;
            return Ok(Some(self.hit(product, Tier::NutritionApi)));
        }

        if let Some(product) = self.cosmetics.resolve(barcode).await {
            self.write_back(&product).await;
            return Ok(Some(self.hit(product, Tier::CosmeticsApi)));
        }

        if let Some(product) = self.fallback.resolve(barcode).await {
            self.write_back(&product).await;
            return Ok(Some(self.hit(product, Tier::Fallback)));
        }

        info!(barcode = %barcode, "Product not found in any tier");
        Ok(None)
    }

    fn hit(&self, product: Product, tier: Tier) -> Resolution {
        info!(
            barcode = %product.barcode,
            tier = %tier,
            score = product.score,
            "Product resolved"
        );
        Resolution { product, tier }
    }

    /// Best-effort write-back into the durable store and the cache.
    ///
    /// Upserts are idempotent, so concurrent resolutions of the same
    /// never-seen barcode may duplicate work but not corrupt state.
    async fn write_back(&self, product: &Product) {
        if let Err(e) = self.store.upsert(product).await {
            warn!(
                barcode = %product.barcode,
                error = %e,
                "Durable store write-back failed; resolution unaffected"
            );
        }
        self.cache.insert(product.clone()).await;
    }
}
