//! Mock catalog source for testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use showcase_core::{Category, Error, Result};

use crate::records::{CategoryRecord, assemble_categories};
use crate::{CatalogSource, FileUrlResolver};

/// Catalog source that returns canned categories.
///
/// Useful for testing the web layer without a running CMS. Clones share the
/// fetch counter.
#[derive(Clone)]
pub struct MockCatalogSource {
    outcome: Outcome,
    fetches: Arc<AtomicUsize>,
}

#[derive(Clone)]
enum Outcome {
    Categories(Vec<Category>),
    Failure(String),
}

impl MockCatalogSource {
    /// Creates a source returning `categories` as given.
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            outcome: Outcome::Categories(categories),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a source returning no categories.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a source from raw CMS records, assembled the same way as
    /// records fetched over HTTP.
    pub fn from_records(records: Vec<CategoryRecord>, files: &FileUrlResolver) -> Self {
        Self::new(assemble_categories(records, files))
    }

    /// Creates a source whose every fetch fails with a backend error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure(message.into()),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Categories(categories) => Ok(categories.clone()),
            Outcome::Failure(message) => Err(Error::backend(message.clone())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::records::{CategoryExpand, ProductRecord};

    fn category(id: &str) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_uppercase(),
            sort: 0,
            products: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_mock_returns_categories() {
        let source = MockCatalogSource::new(vec![category("a"), category("b")]);
        let categories = source.fetch_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].name, "B");
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let source = MockCatalogSource::failing("CMS unavailable");
        let err = source.fetch_categories().await.unwrap_err();
        assert!(err.is_backend());
        assert_eq!(err.to_string(), "Backend error: CMS unavailable");
    }

    #[tokio::test]
    async fn test_mock_counts_shared_between_clones() {
        let source = MockCatalogSource::empty();
        let clone = source.clone();
        source.fetch_categories().await.unwrap();
        clone.fetch_categories().await.unwrap();
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_from_records() {
        let files = FileUrlResolver::new("http://127.0.0.1:8090", "products").unwrap();
        let records = vec![CategoryRecord {
            id: "c".into(),
            name: "C".into(),
            sort: 0,
            expand: CategoryExpand {
                products: vec![
                    ProductRecord {
                        id: "p2".into(),
                        name: "Second".into(),
                        description: None,
                        icon: None,
                        sort: 2,
                    },
                    ProductRecord {
                        id: "p1".into(),
                        name: "First".into(),
                        description: None,
                        icon: Some("i.png".into()),
                        sort: 1,
                    },
                ],
            },
        }];

        let source = MockCatalogSource::from_records(records, &files);
        let categories = source.fetch_categories().await.unwrap();
        let names: Vec<_> = categories[0].products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert!(categories[0].products[0].has_icon());
    }
}
