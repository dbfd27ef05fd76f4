//! Cosmetics source
//!
//! No live cosmetics database is integrated yet (candidates: EWG Skin Deep,
//! CosmEthics), so the resolution tier always reports absence. Cosmetic
//! products enter the system through the manual-entry operation below,
//! invoked by administrative tooling rather than by the resolution chain.

use super::ProductSource;
use crate::analysis::ingredients;
use scanwise_common::{Category, Product};
use tracing::debug;

/// Cosmetics tier of the resolution chain
#[derive(Debug, Clone, Default)]
pub struct CosmeticsSource;

impl CosmeticsSource {
    pub fn new() -> Self {
        Self
    }
}

impl ProductSource for CosmeticsSource {
    fn name(&self) -> &'static str {
        "cosmetics"
    }

    async fn resolve(&self, barcode: &str) -> Option<Product> {
        debug!(barcode = %barcode, source = self.name(), "No live cosmetics source configured");
        None
    }
}

/// Build a scored cosmetic product from manually entered data.
///
/// The ingredient scorer derives score, warnings, benefits and the
/// risk-tagged additive list; allergen data has no cosmetic source and
/// starts empty.
pub fn analyze_product(
    barcode: String,
    name: String,
    brand: String,
    ingredients_list: Vec<String>,
) -> Product {
    let analysis = ingredients::analyze(&ingredients_list);

    Product {
        barcode,
        name,
        brand,
        category: Category::Cosmetic,
        score: analysis.score,
        ingredients: ingredients_list,
        additives: analysis.additives,
        allergens: vec![],
        warnings: analysis.warnings,
        benefits: analysis.benefits,
        image: None,
    }
}
