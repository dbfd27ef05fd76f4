//! Resolution orchestrator tests
//!
//! Exercises the tier chain with recording fakes: ordering, short-circuit
//! on first hit, write-back behavior, and input validation.

use scanwise_common::{Category, Error, Product, Result};
use scanwise_sr::cache::ProductCache;
use scanwise_sr::resolver::{Resolver, Tier};
use scanwise_sr::sources::{ProductSink, ProductSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn product(barcode: &str) -> Product {
    Product {
        barcode: barcode.to_string(),
        name: format!("Product {}", barcode),
        brand: "Brand".to_string(),
        category: Category::Cosmetic,
        score: 70,
        ingredients: vec!["Water".to_string()],
        additives: vec![],
        allergens: vec![],
        warnings: vec![],
        benefits: vec![],
        image: None,
    }
}

/// Recording tier fake: serves at most one product, counts resolve calls
#[derive(Clone, Default)]
struct FakeSource {
    product: Option<Product>,
    calls: Arc<AtomicUsize>,
}

impl FakeSource {
    fn with(product: Product) -> Self {
        Self {
            product: Some(product),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProductSource for FakeSource {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn resolve(&self, barcode: &str) -> Option<Product> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.product.clone().filter(|p| p.barcode == barcode)
    }
}

/// Store fake: a recording source plus a recording (optionally failing) sink
#[derive(Clone, Default)]
struct FakeStore {
    source: FakeSource,
    upserts: Arc<Mutex<Vec<Product>>>,
    fail_upserts: bool,
}

impl FakeStore {
    fn failing() -> Self {
        Self {
            fail_upserts: true,
            ..Default::default()
        }
    }

    fn upserted(&self) -> Vec<Product> {
        self.upserts.lock().unwrap().clone()
    }
}

impl ProductSource for FakeStore {
    fn name(&self) -> &'static str {
        "fake-store"
    }

    async fn resolve(&self, barcode: &str) -> Option<Product> {
        self.source.resolve(barcode).await
    }
}

impl ProductSink for FakeStore {
    async fn upsert(&self, product: &Product) -> Result<()> {
        if self.fail_upserts {
            return Err(Error::Internal("store unavailable".to_string()));
        }
        self.upserts.lock().unwrap().push(product.clone());
        Ok(())
    }
}

type FakeResolver = Resolver<FakeStore, FakeSource, FakeSource, FakeSource>;

fn resolver(
    store: FakeStore,
    nutrition: FakeSource,
    cosmetics: FakeSource,
    fallback: FakeSource,
) -> FakeResolver {
    Resolver::new(
        ProductCache::new(None),
        store,
        nutrition,
        cosmetics,
        fallback,
    )
}

#[tokio::test]
async fn test_fallback_hit_writes_back_once_and_caches() {
    let store = FakeStore::default();
    let nutrition = FakeSource::default();
    let cosmetics = FakeSource::default();
    let fallback = FakeSource::with(product("111"));

    let resolver = resolver(
        store.clone(),
        nutrition.clone(),
        cosmetics.clone(),
        fallback.clone(),
    );

    let resolution = resolver.resolve("111").await.unwrap().expect("hit");
    assert_eq!(resolution.tier, Tier::Fallback);
    assert_eq!(store.upserted().len(), 1);
    assert_eq!(store.upserted()[0].barcode, "111");

    // Second call comes from the cache without touching any tier again
    let cached = resolver.resolve("111").await.unwrap().expect("hit");
    assert_eq!(cached.tier, Tier::Cache);
    assert_eq!(store.source.calls(), 1);
    assert_eq!(nutrition.calls(), 1);
    assert_eq!(cosmetics.calls(), 1);
    assert_eq!(fallback.calls(), 1);
    assert_eq!(store.upserted().len(), 1);
}

#[tokio::test]
async fn test_store_hit_caches_without_self_upsert() {
    let store = FakeStore {
        source: FakeSource::with(product("222")),
        ..Default::default()
    };
    let resolver = resolver(
        store.clone(),
        FakeSource::default(),
        FakeSource::default(),
        FakeSource::default(),
    );

    let resolution = resolver.resolve("222").await.unwrap().expect("hit");
    assert_eq!(resolution.tier, Tier::DurableStore);
    // Already durable: no redundant write-back
    assert!(store.upserted().is_empty());

    let cached = resolver.resolve("222").await.unwrap().expect("hit");
    assert_eq!(cached.tier, Tier::Cache);
    assert_eq!(store.source.calls(), 1);
}

#[tokio::test]
async fn test_store_wins_over_nutrition_api() {
    let mut stored = product("333");
    stored.name = "From store".to_string();
    let mut fetched = product("333");
    fetched.name = "From API".to_string();

    let store = FakeStore {
        source: FakeSource::with(stored),
        ..Default::default()
    };
    let nutrition = FakeSource::with(fetched);

    let resolver = resolver(
        store,
        nutrition.clone(),
        FakeSource::default(),
        FakeSource::default(),
    );

    let resolution = resolver.resolve("333").await.unwrap().expect("hit");
    assert_eq!(resolution.tier, Tier::DurableStore);
    assert_eq!(resolution.product.name, "From store");
    // Chain short-circuited before the API tier
    assert_eq!(nutrition.calls(), 0);
}

#[tokio::test]
async fn test_nutrition_api_wins_over_fallback() {
    let nutrition = FakeSource::with(product("444"));
    let fallback = FakeSource::with(product("444"));
    let store = FakeStore::default();

    let resolver = resolver(
        store.clone(),
        nutrition,
        FakeSource::default(),
        fallback.clone(),
    );

    let resolution = resolver.resolve("444").await.unwrap().expect("hit");
    assert_eq!(resolution.tier, Tier::NutritionApi);
    assert_eq!(fallback.calls(), 0);
    assert_eq!(store.upserted().len(), 1);
}

#[tokio::test]
async fn test_cosmetics_tier_position_in_chain() {
    let cosmetics = FakeSource::with(product("555"));
    let fallback = FakeSource::default();
    let nutrition = FakeSource::default();
    let store = FakeStore::default();

    let resolver = resolver(
        store.clone(),
        nutrition.clone(),
        cosmetics,
        fallback.clone(),
    );

    let resolution = resolver.resolve("555").await.unwrap().expect("hit");
    assert_eq!(resolution.tier, Tier::CosmeticsApi);
    // Consulted after the nutrition tier, before the fallback table
    assert_eq!(nutrition.calls(), 1);
    assert_eq!(fallback.calls(), 0);
    assert_eq!(store.upserted().len(), 1);
}

#[tokio::test]
async fn test_all_absent_returns_none_without_side_effects() {
    let store = FakeStore::default();
    let resolver = resolver(
        store.clone(),
        FakeSource::default(),
        FakeSource::default(),
        FakeSource::default(),
    );

    let resolution = resolver.resolve("999").await.unwrap();
    assert!(resolution.is_none());
    assert!(store.upserted().is_empty());
}

#[tokio::test]
async fn test_blank_barcode_rejected_before_any_tier() {
    let store = FakeStore::default();
    let nutrition = FakeSource::default();
    let resolver = resolver(
        store.clone(),
        nutrition.clone(),
        FakeSource::default(),
        FakeSource::default(),
    );

    for input in ["", "   ", "\t"] {
        let err = resolver.resolve(input).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    assert_eq!(store.source.calls(), 0);
    assert_eq!(nutrition.calls(), 0);
}

#[tokio::test]
async fn test_barcode_is_trimmed_before_lookup() {
    let resolver = resolver(
        FakeStore::default(),
        FakeSource::default(),
        FakeSource::default(),
        FakeSource::with(product("111")),
    );

    let resolution = resolver.resolve("  111  ").await.unwrap().expect("hit");
    assert_eq!(resolution.product.barcode, "111");
}

#[tokio::test]
async fn test_write_back_failure_never_downgrades_resolution() {
    let store = FakeStore::failing();
    let resolver = resolver(
        store,
        FakeSource::default(),
        FakeSource::default(),
        FakeSource::with(product("666")),
    );

    let resolution = resolver.resolve("666").await.unwrap().expect("hit");
    assert_eq!(resolution.tier, Tier::Fallback);

    // The cache half of the write-back still happened
    let cached = resolver.resolve("666").await.unwrap().expect("hit");
    assert_eq!(cached.tier, Tier::Cache);
}
