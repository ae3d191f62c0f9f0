//! Catalog source abstraction.

use async_trait::async_trait;
use showcase_core::{Category, Result};

/// Abstraction over where the category list comes from.
///
/// This trait allows swapping the CMS backend without changing the web
/// layer. Implementations return categories ordered by their sort key, each
/// with products ordered by theirs.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every category with its products.
    ///
    /// Backend failures propagate as [`Error::Backend`](showcase_core::Error::Backend);
    /// they are not retried.
    async fn fetch_categories(&self) -> Result<Vec<Category>>;
}
