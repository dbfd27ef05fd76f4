//! System statistics and cache administration

use axum::extract::State;
use axum::Json;
use scanwise_common::db::{self, StoreCounts};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::error::ApiResult;
use crate::AppState;

/// Aggregate view over the store, cache and fallback table
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub store: StoreCounts,
    pub cache: CacheStats,
    pub fallback: FallbackStats,
}

#[derive(Debug, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub barcodes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FallbackStats {
    pub size: usize,
}

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let store = db::count_products(&state.db).await?;

    Ok(Json(StatsResponse {
        store,
        cache: CacheStats {
            size: state.cache.len().await,
            barcodes: state.cache.barcodes().await,
        },
        fallback: FallbackStats {
            size: state.fallback_size,
        },
    }))
}

/// DELETE /api/cache
///
/// Explicit operator invalidation; the only way cache entries are removed
/// besides capacity eviction.
pub async fn clear_cache(State(state): State<AppState>) -> Json<serde_json::Value> {
    let removed = state.cache.clear().await;
    info!(removed, "Product cache cleared");
    Json(json!({ "cleared": removed }))
}
