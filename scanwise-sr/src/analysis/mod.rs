//! Product analysis: risk classification and the two scoring algorithms
//!
//! Pure functions, no I/O. The nutrition scorer handles structured food
//! data; the ingredient scorer handles free-text cosmetic ingredient lists
//! via the risk classifier.

pub mod ingredients;
pub mod nutrition;
pub mod risk;
