//! Nutrition scorer
//!
//! Converts a structured nutrition record (Nutri-Score grade, NOVA
//! processing group, per-100g nutrient levels) into a health score with
//! warnings and benefits. Deterministic, no I/O; absent inputs degrade to
//! neutral defaults rather than failing.

use scanwise_common::NutriScore;

/// Raw per-100g nutrient levels as delivered by the nutrition source.
///
/// All values in grams (sodium included; the display record converts it to
/// milligrams separately).
#[derive(Debug, Clone, Copy, Default)]
pub struct NutrientLevels {
    pub sugars: f64,
    pub sodium: f64,
    pub fat: f64,
    pub fiber: f64,
    pub protein: f64,
}

/// Outcome of a nutrition scoring pass
#[derive(Debug, Clone)]
pub struct NutritionAssessment {
    pub score: u8,
    pub warnings: Vec<String>,
    pub benefits: Vec<String>,
}

/// Clamp a raw signed score into the 0..=100 product score range
pub fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Score a food product from its nutrition signals.
///
/// Base score comes from the Nutri-Score grade (absent grade scores a
/// neutral 50); NOVA group 4 (ultra-processed) penalizes 15 points and
/// group 3 penalizes 5. Warnings and benefits are threshold-based and
/// independent of the score; all that apply are emitted.
pub fn assess(
    grade: Option<NutriScore>,
    nova_group: Option<i64>,
    levels: &NutrientLevels,
    additive_count: usize,
) -> NutritionAssessment {
    let mut score: i32 = match grade {
        Some(NutriScore::A) => 85,
        Some(NutriScore::B) => 70,
        Some(NutriScore::C) => 55,
        Some(NutriScore::D) => 40,
        Some(NutriScore::E) => 25,
        None => 50,
    };

    match nova_group {
        Some(4) => score -= 15,
        Some(3) => score -= 5,
        _ => {}
    }

    let mut warnings = Vec::new();
    if levels.sugars > 15.0 {
        warnings.push("High in sugar".to_string());
    }
    if levels.sodium > 0.6 {
        warnings.push("High in sodium".to_string());
    }
    if levels.fat > 20.0 {
        warnings.push("High in fat".to_string());
    }
    if nova_group == Some(4) {
        warnings.push("Ultra-processed product".to_string());
    }
    if additive_count > 5 {
        warnings.push("Contains multiple additives".to_string());
    }

    let mut benefits = Vec::new();
    if levels.fiber > 5.0 {
        benefits.push("High in fiber".to_string());
    }
    if levels.protein > 10.0 {
        benefits.push("Source of protein".to_string());
    }
    if matches!(grade, Some(NutriScore::A) | Some(NutriScore::B)) {
        benefits.push("Good nutritional quality".to_string());
    }
    if nova_group == Some(1) {
        benefits.push("Minimally processed".to_string());
    }

    NutritionAssessment {
        score: clamp_score(score),
        warnings,
        benefits,
    }
}
