//! PocketBase record shapes and their assembly into display models.

use serde::{Deserialize, Serialize};
use showcase_core::{Category, Product};

use crate::FileUrlResolver;

/// One page of a PocketBase record listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage<T> {
    /// 1-based page number.
    pub page: u32,

    /// Requested page size.
    pub per_page: u32,

    /// Total records, `-1` when the count was skipped.
    #[serde(default)]
    pub total_items: i64,

    /// Total pages, `-1` when the count was skipped.
    #[serde(default)]
    pub total_pages: i64,

    /// Records on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// A `product_categories` record with its products expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Record id.
    pub id: String,

    /// Category name.
    pub name: String,

    /// Sort key.
    #[serde(default)]
    pub sort: i64,

    /// Expanded relations. Absent when the category links no products.
    #[serde(default)]
    pub expand: CategoryExpand,
}

/// Relations expanded on a category record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpand {
    /// Linked product records, in link order.
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

/// A `products` record as projected by the category query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Record id.
    pub id: String,

    /// Product name.
    pub name: String,

    /// Rich-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Icon filename.
    #[serde(default)]
    pub icon: Option<String>,

    /// Sort key within the category.
    #[serde(default)]
    pub sort: i64,
}

impl ProductRecord {
    /// Converts to a display product, resolving the icon filename.
    pub fn into_product(self, files: &FileUrlResolver) -> Product {
        let icon = files.resolve(&self.id, self.icon.as_deref());
        Product {
            id: self.id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            icon,
            sort: self.sort,
        }
    }
}

impl CategoryRecord {
    /// Converts to a display category with products sorted by sort key.
    pub fn into_category(self, files: &FileUrlResolver) -> Category {
        let mut category = Category {
            id: self.id,
            name: self.name,
            sort: self.sort,
            products: self
                .expand
                .products
                .into_iter()
                .map(|p| p.into_product(files))
                .collect(),
        };
        category.sort_products();
        category
    }
}

/// Joins category records with their expanded products.
///
/// Absent descriptions become empty strings, icon filenames become thumbnail
/// URLs (empty when absent), products are ordered by sort key within each
/// category, and categories by theirs. Both sorts are stable.
pub fn assemble_categories(records: Vec<CategoryRecord>, files: &FileUrlResolver) -> Vec<Category> {
    let mut categories: Vec<Category> = records
        .into_iter()
        .map(|record| record.into_category(files))
        .collect();
    Category::sort_all(&mut categories);
    categories
}
