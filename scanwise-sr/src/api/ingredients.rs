//! Ingredient risk lookup endpoint

use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use crate::analysis::risk;

/// Risk assessment for a single ingredient name
#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub name: String,
    /// "low" | "moderate" | "high" | "unknown"
    pub risk: String,
    pub description: String,
}

/// GET /api/ingredients/:name
pub async fn ingredient_lookup(Path(name): Path<String>) -> Json<IngredientResponse> {
    let info = risk::ingredient_info(&name);

    Json(IngredientResponse {
        name: info.name,
        risk: info
            .risk
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        description: info.description,
    })
}
