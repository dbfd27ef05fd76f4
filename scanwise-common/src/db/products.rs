//! Product persistence
//!
//! Structured columns for the fields queried directly (barcode, category,
//! name, brand, score); JSON text columns for the nested collections.
//! Stored records are trusted as-is on lookup, no re-scoring.

use crate::model::{Additive, Category, NutriScore, NutritionFacts, Product};
use crate::Result;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// Per-category row counts for the stats endpoint
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct StoreCounts {
    pub total: i64,
    pub food: i64,
    pub cosmetic: i64,
}

/// Insert-or-replace a product, keyed by barcode. Idempotent: applying the
/// same product twice leaves the row in the same observable state.
pub async fn save_product(pool: &SqlitePool, product: &Product) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO products (
            guid, barcode, name, brand, category, score, nutri_score,
            ingredients, nutritional_info, additives, allergens, warnings,
            benefits, image_url, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        ON CONFLICT(barcode) DO UPDATE SET
            name = excluded.name,
            brand = excluded.brand,
            category = excluded.category,
            score = excluded.score,
            nutri_score = excluded.nutri_score,
            ingredients = excluded.ingredients,
            nutritional_info = excluded.nutritional_info,
            additives = excluded.additives,
            allergens = excluded.allergens,
            warnings = excluded.warnings,
            benefits = excluded.benefits,
            image_url = excluded.image_url,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&product.barcode)
    .bind(&product.name)
    .bind(&product.brand)
    .bind(product.category.label())
    .bind(product.score as i64)
    .bind(product.nutri_score().map(|g| g.as_str()))
    .bind(serde_json::to_string(&product.ingredients)?)
    .bind(
        product
            .nutritional_info()
            .map(serde_json::to_string)
            .transpose()?,
    )
    .bind(serde_json::to_string(&product.additives)?)
    .bind(serde_json::to_string(&product.allergens)?)
    .bind(serde_json::to_string(&product.warnings)?)
    .bind(serde_json::to_string(&product.benefits)?)
    .bind(&product.image)
    .execute(pool)
    .await?;

    Ok(())
}

/// Exact-match lookup by barcode
pub async fn load_product_by_barcode(
    pool: &SqlitePool,
    barcode: &str,
) -> Result<Option<Product>> {
    let row = sqlx::query(&format!("{} WHERE barcode = ?", SELECT_PRODUCT))
        .bind(barcode)
        .fetch_optional(pool)
        .await?;

    row.map(product_from_row).transpose()
}

/// List products in a category, bounded
pub async fn find_by_category(
    pool: &SqlitePool,
    category: &str,
    limit: i64,
) -> Result<Vec<Product>> {
    let rows = sqlx::query(&format!(
        "{} WHERE category = ? ORDER BY name LIMIT ?",
        SELECT_PRODUCT
    ))
    .bind(category)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(product_from_row).collect()
}

/// Case-insensitive brand substring search, bounded
pub async fn find_by_brand(pool: &SqlitePool, brand: &str, limit: i64) -> Result<Vec<Product>> {
    let rows = sqlx::query(&format!(
        "{} WHERE brand LIKE ? ORDER BY name LIMIT ?",
        SELECT_PRODUCT
    ))
    .bind(format!("%{}%", brand))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(product_from_row).collect()
}

/// Case-insensitive name substring search, bounded
pub async fn find_by_name(pool: &SqlitePool, name: &str, limit: i64) -> Result<Vec<Product>> {
    let rows = sqlx::query(&format!(
        "{} WHERE name LIKE ? ORDER BY name LIMIT ?",
        SELECT_PRODUCT
    ))
    .bind(format!("%{}%", name))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(product_from_row).collect()
}

/// Row counts, total and per category
pub async fn count_products(pool: &SqlitePool) -> Result<StoreCounts> {
    let rows = sqlx::query("SELECT category, COUNT(*) AS n FROM products GROUP BY category")
        .fetch_all(pool)
        .await?;

    let mut counts = StoreCounts::default();
    for row in rows {
        let category: String = row.get("category");
        let n: i64 = row.get("n");
        counts.total += n;
        match category.as_str() {
            "food" => counts.food = n,
            "cosmetic" => counts.cosmetic = n,
            _ => {}
        }
    }

    Ok(counts)
}

const SELECT_PRODUCT: &str = r#"
    SELECT barcode, name, brand, category, score, nutri_score, ingredients,
           nutritional_info, additives, allergens, warnings, benefits, image_url
    FROM products
"#;

fn product_from_row(row: SqliteRow) -> Result<Product> {
    let category_label: String = row.get("category");
    let nutri_score: Option<String> = row.get("nutri_score");
    let nutritional_info: Option<String> = row.get("nutritional_info");

    let category = match category_label.as_str() {
        "food" => Category::Food {
            nutri_score: nutri_score.as_deref().and_then(NutriScore::from_grade),
            nutritional_info: nutritional_info
                .as_deref()
                .map(serde_json::from_str::<NutritionFacts>)
                .transpose()?,
        },
        _ => Category::Cosmetic,
    };

    let ingredients: String = row.get("ingredients");
    let additives: String = row.get("additives");
    let allergens: String = row.get("allergens");
    let warnings: String = row.get("warnings");
    let benefits: String = row.get("benefits");

    Ok(Product {
        barcode: row.get("barcode"),
        name: row.get("name"),
        brand: row.get("brand"),
        category,
        score: row.get::<i64, _>("score").clamp(0, 100) as u8,
        ingredients: serde_json::from_str(&ingredients)?,
        additives: serde_json::from_str::<Vec<Additive>>(&additives)?,
        allergens: serde_json::from_str(&allergens)?,
        warnings: serde_json::from_str(&warnings)?,
        benefits: serde_json::from_str(&benefits)?,
        image: row.get("image_url"),
    })
}
