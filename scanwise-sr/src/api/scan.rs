//! Barcode resolution endpoint

use axum::extract::{Path, State};
use axum::Json;
use scanwise_common::Product;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Resolution result with the tier that produced it
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    /// Tier label ("cache", "durable-store", "nutrition-api", ...)
    pub source: String,
    pub product: Product,
}

/// GET /api/scan/:barcode
///
/// Resolves through the tier chain. A failed resolution always reads as
/// not-found, even when the true cause was an unreachable source.
pub async fn scan_barcode(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> ApiResult<Json<ScanResponse>> {
    match state.resolver.resolve(&barcode).await? {
        Some(resolution) => Ok(Json(ScanResponse {
            source: resolution.tier.to_string(),
            product: resolution.product,
        })),
        None => Err(ApiError::NotFound(format!(
            "No product found for barcode {}",
            barcode.trim()
        ))),
    }
}
