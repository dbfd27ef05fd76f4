//! Durable-store adapter
//!
//! Wraps the SQLite product store as a resolution tier. Stored records were
//! scored when first resolved and are trusted as-is on lookup; upsert is
//! the write-back half of the resolution chain.

use super::{ProductSink, ProductSource};
use scanwise_common::{db, Product, Result};
use sqlx::SqlitePool;
use tracing::warn;

/// Resolution tier backed by the durable SQLite store
#[derive(Debug, Clone)]
pub struct StoreAdapter {
    pool: SqlitePool,
}

impl StoreAdapter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl ProductSource for StoreAdapter {
    fn name(&self) -> &'static str {
        "durable-store"
    }

    async fn resolve(&self, barcode: &str) -> Option<Product> {
        match db::load_product_by_barcode(&self.pool, barcode).await {
            Ok(product) => product,
            Err(e) => {
                warn!(barcode = %barcode, error = %e, "Durable store lookup failed; treating as absent");
                None
            }
        }
    }
}

impl ProductSink for StoreAdapter {
    async fn upsert(&self, product: &Product) -> Result<()> {
        db::save_product(&self.pool, product).await
    }
}
