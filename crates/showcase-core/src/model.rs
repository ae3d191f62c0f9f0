//! Display-ready catalog records.
//!
//! These are the shapes the web layer renders. They are produced by the CMS
//! data service from backend records, with absent optional fields already
//! normalised to empty strings.

use serde::{Deserialize, Serialize};

/// A named grouping of products with an explicit display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique record identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Sort key among categories (ascending).
    pub sort: i64,

    /// Products in this category, ordered by their sort key.
    pub products: Vec<Product>,
}

/// An individual offering within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique record identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Rich-text description as HTML. Empty when the CMS has none.
    pub description: String,

    /// Absolute URL of the icon thumbnail. Empty when the product has no icon.
    pub icon: String,

    /// Sort key within the owning category (ascending).
    pub sort: i64,
}

impl Category {
    /// Sorts this category's products by sort key. Ties keep their order.
    pub fn sort_products(&mut self) {
        self.products.sort_by_key(|p| p.sort);
    }

    /// Sorts categories by sort key. Ties keep their order.
    pub fn sort_all(categories: &mut [Category]) {
        categories.sort_by_key(|c| c.sort);
    }
}

impl Product {
    /// Whether an icon URL was resolved for this product.
    pub fn has_icon(&self) -> bool {
        !self.icon.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, sort: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            icon: String::new(),
            sort,
        }
    }

    fn category(id: &str, sort: i64) -> Category {
        Category {
            id: id.to_string(),
            name: format!("Category {id}"),
            sort,
            products: Vec::new(),
        }
    }

    #[test]
    fn test_sort_products_ascending() {
        let mut cat = category("c1", 1);
        cat.products = vec![product("a", 3), product("b", 1), product("c", 2)];
        cat.sort_products();
        let ids: Vec<_> = cat.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_products_is_stable() {
        let mut cat = category("c1", 1);
        cat.products = vec![product("first", 0), product("second", 0), product("third", -1)];
        cat.sort_products();
        let ids: Vec<_> = cat.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_sort_all_categories() {
        let mut cats = vec![category("x", 2), category("y", 0), category("z", 1)];
        Category::sort_all(&mut cats);
        let ids: Vec<_> = cats.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "z", "x"]);
    }

    #[test]
    fn test_has_icon() {
        let mut p = product("p", 0);
        assert!(!p.has_icon());
        p.icon = "http://127.0.0.1:8090/api/files/products/p/icon.png".into();
        assert!(p.has_icon());
    }

    #[test]
    fn test_category_serialization() {
        let mut cat = category("c1", 4);
        cat.products.push(product("p1", 1));
        let json = serde_json::to_value(&cat).unwrap();
        assert_eq!(json["id"], "c1");
        assert_eq!(json["sort"], 4);
        assert_eq!(json["products"][0]["description"], "");
    }
}
