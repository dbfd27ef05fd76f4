//! Product data model
//!
//! The unified assessment record produced by every resolution tier and
//! consumed read-only by the presentation layer. A `Product` is scored once
//! at construction and never mutated afterwards; re-resolution replaces the
//! whole record.

use serde::{Deserialize, Serialize};

/// Five-level nutritional quality grade (Nutri-Score), consumed from an
/// external source, never computed internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NutriScore {
    A,
    B,
    C,
    D,
    E,
}

impl NutriScore {
    /// Parse a grade letter as delivered by external APIs ("a" / "A" / ...).
    pub fn from_grade(grade: &str) -> Option<Self> {
        match grade.trim().to_ascii_uppercase().as_str() {
            "A" => Some(NutriScore::A),
            "B" => Some(NutriScore::B),
            "C" => Some(NutriScore::C),
            "D" => Some(NutriScore::D),
            "E" => Some(NutriScore::E),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NutriScore::A => "A",
            NutriScore::B => "B",
            NutriScore::C => "C",
            NutriScore::D => "D",
            NutriScore::E => "E",
        }
    }
}

impl std::fmt::Display for NutriScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk tier assigned to a detected additive.
///
/// Ordering is by severity (`Low < Moderate < High`) so the highest match
/// can be selected with `Ord::max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Low,
    Moderate,
    High,
}

impl Risk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Risk::Low => "low",
            Risk::Moderate => "moderate",
            Risk::High => "high",
        }
    }
}

impl std::fmt::Display for Risk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk-tagged substance detected in a product's ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Additive {
    pub name: String,
    pub code: String,
    pub risk: Risk,
}

/// Nutritional breakdown per 100 g / 100 ml.
///
/// `calories` is an integer kcal value and `sodium` an integer milligram
/// value; all other fields are rounded to one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sodium: i64,
    pub sugar: f64,
}

/// Product category. Food products may carry a Nutri-Score grade and
/// nutritional breakdown; cosmetic products structurally cannot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum Category {
    Food {
        #[serde(rename = "nutriScore", default, skip_serializing_if = "Option::is_none")]
        nutri_score: Option<NutriScore>,
        #[serde(rename = "nutritionalInfo", default, skip_serializing_if = "Option::is_none")]
        nutritional_info: Option<NutritionFacts>,
    },
    Cosmetic,
}

impl Category {
    /// Category label as stored in the database and exposed in query APIs.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food { .. } => "food",
            Category::Cosmetic => "cosmetic",
        }
    }
}

/// The unified consumer-health assessment record.
///
/// Keyed by `barcode` across every resolution tier. `score` is always
/// clamped to 0..=100 by the scorers before construction; `warnings` and
/// `benefits` are generated by the same analysis pass that produced the
/// score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    #[serde(flatten)]
    pub category: Category,
    pub score: u8,
    pub ingredients: Vec<String>,
    pub additives: Vec<Additive>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    pub fn is_food(&self) -> bool {
        matches!(self.category, Category::Food { .. })
    }

    pub fn nutri_score(&self) -> Option<NutriScore> {
        match &self.category {
            Category::Food { nutri_score, .. } => *nutri_score,
            Category::Cosmetic => None,
        }
    }

    pub fn nutritional_info(&self) -> Option<&NutritionFacts> {
        match &self.category {
            Category::Food { nutritional_info, .. } => nutritional_info.as_ref(),
            Category::Cosmetic => None,
        }
    }
}
