//! Open Food Facts API client
//!
//! Nutrition tier of the resolution chain: looks a barcode up in the Open
//! Food Facts product database, maps the external schema into the internal
//! nutrition record, and invokes the nutrition scorer to populate score,
//! warnings and benefits before returning the product.

use super::ProductSource;
use crate::analysis::nutrition::{self, NutrientLevels};
use scanwise_common::{Additive, Category, NutriScore, NutritionFacts, Product, Risk};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const USER_AGENT: &str = "Scanwise/0.1.0 (https://github.com/scanwise/scanwise)";

/// Open Food Facts client errors
#[derive(Debug, Error)]
pub enum OffError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Product payload from the Open Food Facts v2 API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffProduct {
    #[serde(default)]
    pub code: String,
    pub product_name: Option<String>,
    pub brands: Option<String>,
    pub ingredients_text: Option<String>,
    #[serde(default)]
    pub nutriments: OffNutriments,
    pub nutriscore_grade: Option<String>,
    #[serde(default)]
    pub additives_tags: Vec<String>,
    #[serde(default)]
    pub allergens_tags: Vec<String>,
    pub image_url: Option<String>,
    pub nova_group: Option<i64>,
}

/// Per-100g nutrient values; absent fields default to zero downstream
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffNutriments {
    #[serde(rename = "energy-kcal_100g")]
    pub energy_kcal_100g: Option<f64>,
    pub proteins_100g: Option<f64>,
    pub carbohydrates_100g: Option<f64>,
    pub fat_100g: Option<f64>,
    pub fiber_100g: Option<f64>,
    pub sodium_100g: Option<f64>,
    pub sugars_100g: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OffResponse {
    #[serde(default)]
    status: i64,
    product: Option<OffProduct>,
}

/// Open Food Facts API client
pub struct OpenFoodFactsClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    /// Create a client against the given base URL with a bounded timeout.
    ///
    /// The base URL is configurable so tests can point at an unroutable
    /// endpoint to exercise the failure-to-absent contract.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, OffError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| OffError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Lookup a product by barcode.
    ///
    /// A `status = 0` payload or a missing product object is absence, not
    /// an error; only transport and decoding problems produce `Err`.
    pub async fn lookup(&self, barcode: &str) -> Result<Option<OffProduct>, OffError> {
        let url = format!("{}/api/v2/product/{}.json", self.base_url, barcode);

        debug!(barcode = %barcode, url = %url, "Querying Open Food Facts API");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| OffError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == 404 {
            return Ok(None);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OffError::ApiError(status.as_u16(), error_text));
        }

        let payload: OffResponse = response
            .json()
            .await
            .map_err(|e| OffError::ParseError(e.to_string()))?;

        if payload.status == 0 {
            return Ok(None);
        }

        Ok(payload.product)
    }
}

impl ProductSource for OpenFoodFactsClient {
    fn name(&self) -> &'static str {
        "open-food-facts"
    }

    async fn resolve(&self, barcode: &str) -> Option<Product> {
        match self.lookup(barcode).await {
            Ok(Some(off_product)) => Some(to_product(barcode, off_product)),
            Ok(None) => {
                debug!(barcode = %barcode, source = self.name(), "Product not found");
                None
            }
            Err(e) => {
                warn!(
                    barcode = %barcode,
                    source = self.name(),
                    error = %e,
                    "Source unreachable; treating as absent"
                );
                None
            }
        }
    }
}

/// Map an Open Food Facts payload into a scored food product
pub fn to_product(barcode: &str, off: OffProduct) -> Product {
    let grade = off
        .nutriscore_grade
        .as_deref()
        .and_then(NutriScore::from_grade);

    // Additives come pre-identified from the API ("en:e150d" tags), tagged
    // moderate; the ingredient-level risk classifier only applies to
    // cosmetic products
    let additives: Vec<Additive> = off
        .additives_tags
        .iter()
        .map(|tag| {
            let code = strip_lang_prefix(tag).to_uppercase();
            Additive {
                name: code.clone(),
                code,
                risk: Risk::Moderate,
            }
        })
        .collect();

    let allergens: Vec<String> = off
        .allergens_tags
        .iter()
        .map(|tag| strip_lang_prefix(tag).replace('-', " "))
        .collect();

    let levels = NutrientLevels {
        sugars: off.nutriments.sugars_100g.unwrap_or(0.0),
        sodium: off.nutriments.sodium_100g.unwrap_or(0.0),
        fat: off.nutriments.fat_100g.unwrap_or(0.0),
        fiber: off.nutriments.fiber_100g.unwrap_or(0.0),
        protein: off.nutriments.proteins_100g.unwrap_or(0.0),
    };

    let assessment = nutrition::assess(grade, off.nova_group, &levels, additives.len());

    let nutritional_info = NutritionFacts {
        calories: off.nutriments.energy_kcal_100g.unwrap_or(0.0).round() as i64,
        protein: round1(levels.protein),
        carbs: round1(off.nutriments.carbohydrates_100g.unwrap_or(0.0)),
        fat: round1(levels.fat),
        fiber: round1(levels.fiber),
        sodium: (levels.sodium * 1000.0).round() as i64,
        sugar: round1(levels.sugars),
    };

    let ingredients: Vec<String> = off
        .ingredients_text
        .as_deref()
        .map(|text| {
            text.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let barcode = if off.code.is_empty() {
        barcode.to_string()
    } else {
        off.code
    };

    Product {
        barcode,
        name: off
            .product_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unnamed product".to_string()),
        brand: off
            .brands
            .as_deref()
            .and_then(|b| b.split(',').next())
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "Unknown brand".to_string()),
        category: Category::Food {
            nutri_score: grade,
            nutritional_info: Some(nutritional_info),
        },
        score: assessment.score,
        ingredients,
        additives,
        allergens,
        warnings: assessment.warnings,
        benefits: assessment.benefits,
        image: off.image_url,
    }
}

/// Strip the "en:" (or any language) tag prefix from an OFF tag value
fn strip_lang_prefix(tag: &str) -> &str {
    match tag.split_once(':') {
        Some((_, rest)) => rest,
        None => tag,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
