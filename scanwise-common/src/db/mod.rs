//! Database access layer for the Scanwise product store
//!
//! SQLite-backed persistence for resolved products. The store is a
//! key-value-with-query capability: exact lookup by barcode, idempotent
//! upsert, and bounded list queries by category/brand/name.

pub mod init;
pub mod products;

pub use init::{create_schema, init_database};
pub use products::{
    count_products, find_by_brand, find_by_category, find_by_name, load_product_by_barcode,
    save_product, StoreCounts,
};
