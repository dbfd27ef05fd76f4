//! In-process product cache
//!
//! Barcode-keyed map populated on every successful resolution and consulted
//! as the first tier of the lookup chain. Entries have no TTL and are never
//! refreshed; invalidation is an explicit operator action (`clear`).
//!
//! Unbounded by default. When a capacity is configured, inserting into a
//! full cache evicts the oldest-inserted entry.

use scanwise_common::Product;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct CacheInner {
    map: HashMap<String, Product>,
    order: VecDeque<String>,
    capacity: Option<usize>,
}

/// Shared product cache, cheap to clone across handlers and the resolver
#[derive(Debug, Clone)]
pub struct ProductCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl ProductCache {
    /// Create a cache. `capacity: None` means unbounded.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheInner {
                map: HashMap::new(),
                order: VecDeque::new(),
                capacity,
            })),
        }
    }

    pub async fn get(&self, barcode: &str) -> Option<Product> {
        self.inner.read().await.map.get(barcode).cloned()
    }

    pub async fn insert(&self, product: Product) {
        let mut inner = self.inner.write().await;

        let barcode = product.barcode.clone();
        if inner.map.insert(barcode.clone(), product).is_some() {
            // Replacement keeps the entry's original eviction position
            return;
        }

        inner.order.push_back(barcode);
        if let Some(capacity) = inner.capacity {
            while inner.order.len() > capacity {
                if let Some(oldest) = inner.order.pop_front() {
                    inner.map.remove(&oldest);
                }
            }
        }
    }

    /// Drop every entry; returns the number of entries removed
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.write().await;
        let removed = inner.map.len();
        inner.map.clear();
        inner.order.clear();
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.map.is_empty()
    }

    /// Currently cached barcodes (for the stats endpoint)
    pub async fn barcodes(&self) -> Vec<String> {
        self.inner.read().await.order.iter().cloned().collect()
    }
}
