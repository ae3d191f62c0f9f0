//! Data service for the product showcase.
//!
//! Loads every product category, with its products expanded, from the
//! PocketBase CMS and reshapes the records into display-ready
//! [`Category`](showcase_core::Category) values.
//!
//! # Key Abstractions
//!
//! - [`CatalogSource`]: anything that can produce the category list
//! - [`PocketBaseSource`]: the HTTP implementation against PocketBase
//! - [`MockCatalogSource`]: canned categories for tests and offline runs
//! - [`assemble_categories`]: the record → model join

mod files;
mod mock;
mod pocketbase;
mod records;
mod source;

pub use files::FileUrlResolver;
pub use mock::MockCatalogSource;
pub use pocketbase::{CATEGORY_FIELDS, MAX_PAGES, PAGE_SIZE, PocketBaseSettings, PocketBaseSource};
pub use records::{CategoryExpand, CategoryRecord, ProductRecord, RecordPage, assemble_categories};
pub use source::CatalogSource;
