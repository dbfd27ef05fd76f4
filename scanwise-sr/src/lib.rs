//! scanwise-sr library interface
//!
//! Exposes the resolution pipeline, scorers and HTTP surface for
//! integration testing.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod error;
pub mod resolver;
pub mod sources;

pub use crate::error::{ApiError, ApiResult};

use axum::routing::{delete, get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::cache::ProductCache;
use crate::resolver::Resolver;
use crate::sources::{CosmeticsSource, FallbackTable, OpenFoodFactsClient, StoreAdapter};

/// The resolver with the production tier adapters plugged in
pub type ServiceResolver =
    Resolver<StoreAdapter, OpenFoodFactsClient, CosmeticsSource, FallbackTable>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Product store connection pool
    pub db: SqlitePool,
    /// Shared product cache (same instance the resolver writes through)
    pub cache: ProductCache,
    /// Tiered barcode resolver
    pub resolver: Arc<ServiceResolver>,
    /// Number of compiled-in fallback products, for the stats endpoint
    pub fallback_size: usize,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        cache: ProductCache,
        resolver: Arc<ServiceResolver>,
        fallback_size: usize,
    ) -> Self {
        Self {
            db,
            cache,
            resolver,
            fallback_size,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/scan/:barcode", get(api::scan::scan_barcode))
        .route(
            "/api/products",
            get(api::products::search_products).post(api::products::save_product),
        )
        .route("/api/cosmetics/analyze", post(api::products::analyze_cosmetic))
        .route("/api/ingredients/:name", get(api::ingredients::ingredient_lookup))
        .route("/api/stats", get(api::stats::stats))
        .route("/api/cache", delete(api::stats::clear_cache))
        .merge(api::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
