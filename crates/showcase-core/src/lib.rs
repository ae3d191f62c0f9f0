//! Showcase Core: shared types, errors, carousel navigation and schema.
//!
//! This crate provides the foundational types used across all showcase
//! crates. It has no internal showcase dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`model`]: Display-ready categories and products
//! - [`carousel`]: Wraparound navigation and layout windows
//! - [`schema`]: CMS collection schema and reversible migrations

pub mod carousel;
pub mod error;
pub mod model;
pub mod schema;

// Re-export key types at crate root for convenience
pub use carousel::{Carousel, Position, Window, WindowEntry};
pub use error::{Error, Result};
pub use model::{Category, Product};
