//! The product catalog's migration history.

use super::{CollectionSchema, FieldKind, FieldSpec, Migration, SchemaChange};

/// Identifier of the products collection.
pub const PRODUCTS_COLLECTION_ID: &str = "pbc_1108966215";

/// Name of the products collection.
pub const PRODUCTS_COLLECTION: &str = "products";

/// Identifier of the product categories collection.
pub const CATEGORIES_COLLECTION_ID: &str = "pbc_3283744169";

/// Name of the product categories collection.
pub const CATEGORIES_COLLECTION: &str = "product_categories";

fn record_id() -> FieldSpec {
    FieldSpec::new("text3208210256", "id", FieldKind::Text)
        .required()
        .system()
}

fn sort_field() -> FieldSpec {
    FieldSpec::new(
        "number1361375778",
        "sort",
        FieldKind::Number {
            min: Some(0.0),
            max: None,
            only_int: true,
        },
    )
    .required()
}

fn product_category_relation() -> FieldSpec {
    FieldSpec::new(
        "relation105650625",
        "category",
        FieldKind::Relation {
            collection_id: CATEGORIES_COLLECTION_ID.to_string(),
            min_select: 0,
            max_select: 1,
            cascade_delete: false,
        },
    )
    .required()
}

fn category_products_relation() -> FieldSpec {
    FieldSpec::new(
        "relation3015334490",
        "products",
        FieldKind::Relation {
            collection_id: PRODUCTS_COLLECTION_ID.to_string(),
            min_select: 0,
            max_select: 999,
            cascade_delete: false,
        },
    )
}

fn products_collection() -> CollectionSchema {
    CollectionSchema::new(
        PRODUCTS_COLLECTION_ID,
        PRODUCTS_COLLECTION,
        vec![
            record_id(),
            FieldSpec::new("text1579384326", "name", FieldKind::Text)
                .required()
                .presentable(),
            FieldSpec::new("editor1843675174", "description", FieldKind::Editor),
            product_category_relation(),
            FieldSpec::new("file3309110367", "icon", FieldKind::File { max_select: 1 }),
        ],
    )
}

fn categories_collection() -> CollectionSchema {
    CollectionSchema::new(
        CATEGORIES_COLLECTION_ID,
        CATEGORIES_COLLECTION,
        vec![
            record_id(),
            FieldSpec::new("text1579384326", "name", FieldKind::Text)
                .required()
                .presentable(),
        ],
    )
}

/// Every catalog migration, oldest first.
///
/// Applied to an empty schema they produce:
///
/// - `products`: id, name, description, sort, icon
/// - `product_categories`: id, name, sort, products (multi relation)
///
/// Products originally pointed at their category through a single required
/// relation; the final step drops it in favour of the category-side
/// `products` relation, which lets one query expand a category's products.
pub fn catalog_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1758880000,
            "created_product_categories",
            SchemaChange::CreateCollection {
                position: 0,
                collection: categories_collection(),
            },
        ),
        Migration::new(
            1758880001,
            "created_products",
            SchemaChange::CreateCollection {
                position: 1,
                collection: products_collection(),
            },
        ),
        Migration::new(
            1758882317,
            "updated_product",
            SchemaChange::AddField {
                collection_id: PRODUCTS_COLLECTION_ID.to_string(),
                position: 4,
                field: sort_field(),
            },
        ),
        Migration::new(
            1758882340,
            "updated_product_categories",
            SchemaChange::AddField {
                collection_id: CATEGORIES_COLLECTION_ID.to_string(),
                position: 2,
                field: sort_field(),
            },
        ),
        Migration::new(
            1758883464,
            "updated_product_categories",
            SchemaChange::AddField {
                collection_id: CATEGORIES_COLLECTION_ID.to_string(),
                position: 3,
                field: category_products_relation(),
            },
        ),
        Migration::new(
            1758883681,
            "updated_product",
            SchemaChange::RemoveField {
                collection_id: PRODUCTS_COLLECTION_ID.to_string(),
                position: 3,
                field: product_category_relation(),
            },
        ),
    ]
}
