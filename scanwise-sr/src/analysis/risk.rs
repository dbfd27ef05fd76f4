//! Ingredient risk classifier
//!
//! Static domain-knowledge table mapping ingredient-name fragments to a risk
//! tier. Matching is case-insensitive substring containment, not
//! tokenization: "aluminum chlorohydrate" matches both the "aluminum" and
//! the "aluminum chlorohydrate" keys. Callers that need a single tier take
//! the highest-severity match.

use scanwise_common::Risk;

/// Risk table for common cosmetic and personal-care ingredients.
///
/// Keys are lowercase fragments matched by substring containment.
pub const RISK_TABLE: &[(&str, Risk)] = &[
    // Parabens
    ("methylparaben", Risk::Moderate),
    ("propylparaben", Risk::Moderate),
    ("butylparaben", Risk::High),
    // Sulfates
    ("sodium lauryl sulfate", Risk::Moderate),
    ("sodium laureth sulfate", Risk::Moderate),
    ("sls", Risk::Moderate),
    // Formaldehyde and releasers
    ("formaldehyde", Risk::High),
    ("dmdm hydantoin", Risk::High),
    ("quaternium-15", Risk::High),
    // Phthalates
    ("phthalate", Risk::High),
    ("dbp", Risk::High),
    ("dehp", Risk::High),
    // Others
    ("triclosan", Risk::Moderate),
    ("triclocarban", Risk::Moderate),
    ("aluminum", Risk::Moderate),
    ("aluminum chlorohydrate", Risk::Moderate),
    ("fragrance", Risk::Moderate),
    ("parfum", Risk::Moderate),
    ("petrolatum", Risk::Low),
    ("mineral oil", Risk::Low),
    ("silicone", Risk::Low),
    ("dimethicone", Risk::Low),
    ("glycerin", Risk::Low),
    ("hyaluronic acid", Risk::Low),
    ("vitamin e", Risk::Low),
    ("vitamin c", Risk::Low),
];

/// All risk-table entries whose key is a substring of `ingredient`, in
/// table order. One ingredient may match several keys.
pub fn matches(ingredient: &str) -> Vec<(&'static str, Risk)> {
    let lower = ingredient.to_lowercase();
    RISK_TABLE
        .iter()
        .filter(|(key, _)| lower.contains(key))
        .copied()
        .collect()
}

/// Highest-severity risk tier among all matching table keys, or `None`
/// when the ingredient is not catalogued.
pub fn classify(ingredient: &str) -> Option<Risk> {
    matches(ingredient).into_iter().map(|(_, risk)| risk).max()
}

/// Risk and consumer-facing description for a single ingredient
#[derive(Debug, Clone)]
pub struct IngredientInfo {
    pub name: String,
    pub risk: Option<Risk>,
    pub description: String,
}

/// Look up risk and description for an ingredient name.
///
/// Uses the highest-severity match; ties break in table order.
pub fn ingredient_info(ingredient: &str) -> IngredientInfo {
    let best = matches(ingredient)
        .into_iter()
        .max_by_key(|(_, risk)| *risk);

    match best {
        Some((key, risk)) => IngredientInfo {
            name: ingredient.to_string(),
            risk: Some(risk),
            description: description_for(key, risk),
        },
        None => IngredientInfo {
            name: ingredient.to_string(),
            risk: None,
            description:
                "Ingredient not catalogued. Consult a dermatologist for more information."
                    .to_string(),
        },
    }
}

fn description_for(key: &str, risk: Risk) -> String {
    match key {
        "methylparaben" => "Preservative that can irritate sensitive skin".to_string(),
        "sodium lauryl sulfate" => "Cleansing agent that can dry out the skin".to_string(),
        "formaldehyde" => "Preservative and potential carcinogen".to_string(),
        "triclosan" => "Antibacterial agent that can disrupt hormones".to_string(),
        "aluminum" => "Metal that can be absorbed through the skin".to_string(),
        "fragrance" => "Can cause allergies and irritation".to_string(),
        "glycerin" => "Safe and effective natural moisturizer".to_string(),
        "hyaluronic acid" => "Powerful moisturizer that binds water in the skin".to_string(),
        "vitamin e" => "Antioxidant that protects the skin".to_string(),
        _ => format!("Ingredient with {} risk", risk),
    }
}
