//! Resolution source adapters
//!
//! Each tier of the lookup chain implements [`ProductSource`]: absence is a
//! valid result, and a transport failure is absorbed locally (logged, then
//! reported as absent) so the chain can continue to the next tier. Callers
//! cannot distinguish "not found" from "source unreachable" by design; the
//! distinction survives only in the adapter's log output.

use scanwise_common::{Product, Result};

pub mod cosmetics;
pub mod fallback;
pub mod openfoodfacts;
pub mod store;

pub use cosmetics::CosmeticsSource;
pub use fallback::FallbackTable;
pub use openfoodfacts::OpenFoodFactsClient;
pub use store::StoreAdapter;

/// A lookup tier: resolve a barcode to a product, or report absence.
///
/// Implementations must never fail for ordinary not-found, and must convert
/// transport failures (timeouts, malformed payloads, non-success statuses)
/// into absence after logging them.
pub trait ProductSource {
    /// Short source label used in structured log fields
    fn name(&self) -> &'static str;

    fn resolve(
        &self,
        barcode: &str,
    ) -> impl std::future::Future<Output = Option<Product>> + Send;
}

/// A write-back target: idempotent insert-or-replace keyed by barcode.
pub trait ProductSink {
    fn upsert(&self, product: &Product) -> impl std::future::Future<Output = Result<()>> + Send;
}
