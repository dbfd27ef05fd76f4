//! Product administration endpoints
//!
//! Store search, manual product save, and manual cosmetic analysis. These
//! sit outside the resolution chain and are used by administrative tooling.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use scanwise_common::{db, Product};
use serde::Deserialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::sources::cosmetics;
use crate::AppState;

/// Maximum rows returned by a search
const SEARCH_LIMIT: i64 = 50;

/// Search filters; exactly one is applied, in this precedence order
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub name: Option<String>,
}

/// GET /api/products?category=|brand=|name=
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = if let Some(category) = params.category {
        match category.as_str() {
            "food" | "cosmetic" => {
                db::find_by_category(&state.db, &category, SEARCH_LIMIT).await?
            }
            other => {
                return Err(ApiError::BadRequest(format!(
                    "Unknown category: {} (expected \"food\" or \"cosmetic\")",
                    other
                )))
            }
        }
    } else if let Some(brand) = params.brand {
        db::find_by_brand(&state.db, &brand, SEARCH_LIMIT).await?
    } else if let Some(name) = params.name {
        db::find_by_name(&state.db, &name, SEARCH_LIMIT).await?
    } else {
        return Err(ApiError::BadRequest(
            "Provide a category, brand or name filter".to_string(),
        ));
    };

    Ok(Json(products))
}

/// POST /api/products
///
/// Administrative insert-or-replace of a full product record; the cache is
/// updated alongside the store so a subsequent scan serves the new record.
pub async fn save_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    if product.barcode.trim().is_empty() {
        return Err(ApiError::BadRequest("Barcode must not be empty".to_string()));
    }
    if product.score > 100 {
        return Err(ApiError::BadRequest(format!(
            "Score {} out of range (expected 0-100)",
            product.score
        )));
    }

    db::save_product(&state.db, &product).await?;
    state.cache.insert(product.clone()).await;

    info!(barcode = %product.barcode, "Product saved via admin API");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Manual cosmetic entry
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub ingredients: Vec<String>,
}

/// POST /api/cosmetics/analyze
///
/// Scores a manually entered cosmetic product via the ingredient scorer.
/// Returns the scored record without persisting it; saving is a separate
/// explicit step.
pub async fn analyze_cosmetic(
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<Product>> {
    if request.barcode.trim().is_empty() {
        return Err(ApiError::BadRequest("Barcode must not be empty".to_string()));
    }

    let product = cosmetics::analyze_product(
        request.barcode,
        request.name,
        request.brand,
        request.ingredients,
    );

    Ok(Json(product))
}
