//! Server-rendered pages for the product showcase.
//!
//! - [`render`]: HTML components (product, category, carousel, page shell)
//! - [`server`]: axum routes that fetch the catalog and render the home page

pub mod render;
pub mod server;

pub use render::SiteSettings;
pub use server::{AppState, router, serve};
