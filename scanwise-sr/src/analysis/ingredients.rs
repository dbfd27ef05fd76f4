//! Ingredient scorer
//!
//! Converts a free-text ingredient list into a health score, warnings,
//! benefits, and a risk-tagged additive list via the risk classifier. Used
//! for cosmetic products, which carry no structured nutrition data.
//!
//! An ingredient matching several risk-table keys contributes one additive
//! entry (and one score delta) per match; the multiplicity is intentional
//! and callers must not deduplicate it.

use super::risk;
use scanwise_common::{Additive, Risk};

/// Base score for cosmetic products before any ingredient adjustments
const COSMETIC_BASE_SCORE: i32 = 70;

/// Outcome of an ingredient scoring pass
#[derive(Debug, Clone)]
pub struct IngredientAnalysis {
    pub score: u8,
    pub warnings: Vec<String>,
    pub benefits: Vec<String>,
    pub additives: Vec<Additive>,
}

/// Score an ingredient list.
///
/// Per risk-table match: high risk −15, moderate −5, low 0 (recorded as a
/// benefit). Keyword heuristics (parabens, sulfates, alcohol, vitamins,
/// natural/organic, hyaluronic acid) apply once per product regardless of
/// how many ingredients match. Final score is clamped to 0..=100.
pub fn analyze(ingredients: &[String]) -> IngredientAnalysis {
    let mut score = COSMETIC_BASE_SCORE;
    let mut warnings = Vec::new();
    let mut benefits = Vec::new();
    let mut additives = Vec::new();

    let lowered: Vec<String> = ingredients.iter().map(|i| i.to_lowercase()).collect();

    for (ingredient, lower) in ingredients.iter().zip(&lowered) {
        for (key, risk) in risk::matches(lower) {
            additives.push(Additive {
                name: ingredient.clone(),
                code: key.to_uppercase(),
                risk,
            });

            match risk {
                Risk::High => {
                    score -= 15;
                    warnings.push(format!("Contains {} (high risk)", ingredient));
                }
                Risk::Moderate => {
                    score -= 5;
                    warnings.push(format!("Contains {}", ingredient));
                }
                Risk::Low => {
                    benefits.push(format!("Contains {} (safe)", ingredient));
                }
            }
        }
    }

    // Product-level keyword checks, applied at most once each
    if lowered.iter().any(|i| i.contains("paraben")) {
        warnings.push("Contains parabens".to_string());
    }
    if lowered.iter().any(|i| i.contains("sulfate")) {
        warnings.push("Contains sulfates".to_string());
    }
    // "cetearyl alcohol" is a fatty alcohol, not drying; exempt it from the
    // alcohol warning when it appears in the same ingredient entry
    if lowered
        .iter()
        .any(|i| i.contains("alcohol") && !i.contains("cetearyl"))
    {
        warnings.push("Contains alcohol".to_string());
    }
    if lowered.iter().any(|i| i.contains("vitamin")) {
        benefits.push("Enriched with vitamins".to_string());
    }
    if lowered
        .iter()
        .any(|i| i.contains("natural") || i.contains("organic"))
    {
        benefits.push("Natural ingredients".to_string());
        score += 10;
    }
    if lowered.iter().any(|i| i.contains("hyaluronic")) {
        benefits.push("Contains hyaluronic acid".to_string());
    }

    IngredientAnalysis {
        score: super::nutrition::clamp_score(score),
        warnings,
        benefits,
        additives,
    }
}
