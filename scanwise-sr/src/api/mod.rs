//! HTTP API for scanwise-sr
//!
//! Resolution endpoint plus the administrative surface (manual cosmetic
//! analysis, product search, stats, cache control).

pub mod health;
pub mod ingredients;
pub mod products;
pub mod scan;
pub mod stats;
