//! Static fallback table
//!
//! Compiled-in records for a handful of popular products, used as the last
//! resolution tier when the store and the external APIs all come up empty.
//! Records carry pre-assessed scores; a fallback hit is written back to the
//! durable store to enrich it.

use super::ProductSource;
use scanwise_common::{Additive, Category, NutriScore, NutritionFacts, Product, Risk};
use tracing::debug;

/// Last-resort resolution tier backed by a compiled-in product list
#[derive(Debug, Clone)]
pub struct FallbackTable {
    products: Vec<Product>,
}

impl FallbackTable {
    pub fn new() -> Self {
        Self {
            products: seed_products(),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductSource for FallbackTable {
    fn name(&self) -> &'static str {
        "fallback-table"
    }

    async fn resolve(&self, barcode: &str) -> Option<Product> {
        let hit = self.products.iter().find(|p| p.barcode == barcode).cloned();
        if hit.is_none() {
            debug!(barcode = %barcode, source = self.name(), "Product not found");
        }
        hit
    }
}

fn seed_products() -> Vec<Product> {
    vec![
        Product {
            barcode: "7891000100103".to_string(),
            name: "Coca-Cola Original 2L".to_string(),
            brand: "Coca-Cola".to_string(),
            category: Category::Food {
                nutri_score: Some(NutriScore::E),
                nutritional_info: Some(NutritionFacts {
                    calories: 42,
                    protein: 0.0,
                    carbs: 10.6,
                    fat: 0.0,
                    fiber: 0.0,
                    sodium: 10,
                    sugar: 10.6,
                }),
            },
            score: 35,
            ingredients: vec![
                "Carbonated water".to_string(),
                "Sugar".to_string(),
                "Kola nut extract".to_string(),
                "Caffeine".to_string(),
                "Caramel color IV".to_string(),
                "Acidulant INS 338".to_string(),
                "Flavoring".to_string(),
            ],
            additives: vec![
                Additive {
                    name: "Caramel color IV".to_string(),
                    code: "INS 150d".to_string(),
                    risk: Risk::Moderate,
                },
                Additive {
                    name: "Phosphoric acid".to_string(),
                    code: "INS 338".to_string(),
                    risk: Risk::Moderate,
                },
            ],
            allergens: vec![],
            warnings: vec![
                "High in sugar".to_string(),
                "Ultra-processed beverage".to_string(),
                "Contains caffeine".to_string(),
            ],
            benefits: vec![],
            image: Some(
                "https://images.unsplash.com/photo-1554866585-cd94860890b7?w=400&h=400&fit=crop"
                    .to_string(),
            ),
        },
        Product {
            barcode: "7891000100110".to_string(),
            name: "Coca-Cola Zero 2L".to_string(),
            brand: "Coca-Cola".to_string(),
            category: Category::Food {
                nutri_score: Some(NutriScore::C),
                nutritional_info: Some(NutritionFacts {
                    calories: 0,
                    protein: 0.0,
                    carbs: 0.0,
                    fat: 0.0,
                    fiber: 0.0,
                    sodium: 15,
                    sugar: 0.0,
                }),
            },
            score: 48,
            ingredients: vec![
                "Carbonated water".to_string(),
                "Caramel color IV".to_string(),
                "Acidulant INS 338".to_string(),
                "Sweeteners aspartame and acesulfame K".to_string(),
                "Preservative sodium benzoate".to_string(),
                "Caffeine".to_string(),
            ],
            additives: vec![
                Additive {
                    name: "Aspartame".to_string(),
                    code: "INS 951".to_string(),
                    risk: Risk::Moderate,
                },
                Additive {
                    name: "Acesulfame K".to_string(),
                    code: "INS 950".to_string(),
                    risk: Risk::Moderate,
                },
            ],
            allergens: vec!["Contains phenylalanine".to_string()],
            warnings: vec![
                "Contains artificial sweeteners".to_string(),
                "Phenylketonurics: contains phenylalanine".to_string(),
            ],
            benefits: vec!["Zero sugar".to_string(), "Zero calories".to_string()],
            image: Some(
                "https://images.unsplash.com/photo-1629203851122-3726ecdf080e?w=400&h=400&fit=crop"
                    .to_string(),
            ),
        },
        Product {
            barcode: "7896004700014".to_string(),
            name: "Del Valle Orange Juice 1L".to_string(),
            brand: "Del Valle".to_string(),
            category: Category::Food {
                nutri_score: Some(NutriScore::C),
                nutritional_info: Some(NutritionFacts {
                    calories: 45,
                    protein: 0.3,
                    carbs: 11.0,
                    fat: 0.0,
                    fiber: 0.2,
                    sodium: 5,
                    sugar: 10.5,
                }),
            },
            score: 52,
            ingredients: vec![
                "Water".to_string(),
                "Concentrated orange juice".to_string(),
                "Sugar".to_string(),
                "Vitamin C".to_string(),
                "Acidulant INS 330".to_string(),
            ],
            additives: vec![Additive {
                name: "Citric acid".to_string(),
                code: "INS 330".to_string(),
                risk: Risk::Low,
            }],
            allergens: vec![],
            warnings: vec!["Contains added sugar".to_string()],
            benefits: vec![
                "Enriched with vitamin C".to_string(),
                "Contains natural juice".to_string(),
            ],
            image: Some(
                "https://images.unsplash.com/photo-1600271886742-f049cd451bba?w=400&h=400&fit=crop"
                    .to_string(),
            ),
        },
        Product {
            barcode: "7891024135105".to_string(),
            name: "Dove Original Bar Soap 90g".to_string(),
            brand: "Dove".to_string(),
            category: Category::Cosmetic,
            score: 75,
            ingredients: vec![
                "Sodium Lauroyl Isethionate".to_string(),
                "Stearic Acid".to_string(),
                "Sodium Tallowate".to_string(),
                "Water".to_string(),
                "Sodium Stearate".to_string(),
                "Cocamidopropyl Betaine".to_string(),
                "Fragrance".to_string(),
                "Titanium Dioxide".to_string(),
            ],
            additives: vec![],
            allergens: vec![],
            warnings: vec!["Contains synthetic fragrance".to_string()],
            benefits: vec![
                "1/4 moisturizing cream".to_string(),
                "Neutral pH".to_string(),
                "Dermatologically tested".to_string(),
            ],
            image: Some(
                "https://images.unsplash.com/photo-1585128903994-03b9e8e2d0c7?w=400&h=400&fit=crop"
                    .to_string(),
            ),
        },
    ]
}
