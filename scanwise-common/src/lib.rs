//! # Scanwise Common Library
//!
//! Shared code for the Scanwise services including:
//! - Product data model (the unified assessment record)
//! - Database initialization and product persistence
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{Additive, Category, NutriScore, NutritionFacts, Product, Risk};
