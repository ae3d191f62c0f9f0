//! CMS collection schema and reversible migrations.
//!
//! The CMS stores the collection layout the data service depends on. Every
//! change to that layout is a [`Migration`]: a versioned [`SchemaChange`]
//! whose inverse restores the prior layout exactly. A [`Migrator`] applies an
//! ordered list of migrations forward, or rolls them back in reverse order.
//!
//! This module models the contract only; it does not talk to the CMS.

mod catalog;

pub use catalog::{
    CATEGORIES_COLLECTION, CATEGORIES_COLLECTION_ID, PRODUCTS_COLLECTION, PRODUCTS_COLLECTION_ID,
    catalog_migrations,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ============================================================================
// Schema types
// ============================================================================

/// Every collection known to the CMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Collections in creation order.
    pub collections: Vec<CollectionSchema>,
}

/// One record collection and its ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    /// Stable collection identifier (e.g. `pbc_1108966215`).
    pub id: String,

    /// Collection name used in API paths (e.g. `products`).
    pub name: String,

    /// Fields in display order.
    pub fields: Vec<FieldSpec>,
}

/// A single field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Stable field identifier.
    pub id: String,

    /// Field name as seen in records.
    pub name: String,

    /// Whether a value must be present.
    pub required: bool,

    /// Hidden from API responses.
    #[serde(default)]
    pub hidden: bool,

    /// Used as the record's display label in the admin UI.
    #[serde(default)]
    pub presentable: bool,

    /// Managed by the CMS itself.
    #[serde(default)]
    pub system: bool,

    /// Type and type-specific validation.
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Field type with its validation constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Plain text.
    Text,

    /// Rich text (HTML).
    Editor,

    /// Uploaded file(s).
    File {
        /// Maximum number of files.
        max_select: u32,
    },

    /// Numeric value.
    Number {
        /// Lower bound, inclusive.
        min: Option<f64>,
        /// Upper bound, inclusive.
        max: Option<f64>,
        /// Reject non-integer values.
        only_int: bool,
    },

    /// Link to records of another collection.
    Relation {
        /// Target collection identifier.
        collection_id: String,
        /// Minimum linked records.
        min_select: u32,
        /// Maximum linked records (1 = single relation).
        max_select: u32,
        /// Delete this record when the target is deleted.
        cascade_delete: bool,
    },
}

impl FieldSpec {
    /// Creates an optional, visible field.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            required: false,
            hidden: false,
            presentable: false,
            system: false,
            kind,
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field as system-managed.
    pub fn system(mut self) -> Self {
        self.system = true;
        self
    }

    /// Marks the field as the presentable label.
    pub fn presentable(mut self) -> Self {
        self.presentable = true;
        self
    }
}

impl FieldKind {
    /// Short type name as used by the CMS.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Editor => "editor",
            Self::File { .. } => "file",
            Self::Number { .. } => "number",
            Self::Relation { .. } => "relation",
        }
    }
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no collections exist.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Looks up a collection by identifier or name.
    pub fn collection(&self, id_or_name: &str) -> Option<&CollectionSchema> {
        self.collections
            .iter()
            .find(|c| c.id == id_or_name || c.name == id_or_name)
    }

    fn collection_mut(&mut self, id: &str) -> Result<&mut CollectionSchema> {
        self.collections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::schema(format!("Unknown collection '{id}'")))
    }
}

impl CollectionSchema {
    /// Creates a collection with the given fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields,
        }
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

// ============================================================================
// Changes
// ============================================================================

/// A single reversible schema change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SchemaChange {
    /// Create a collection at `position`. Fails if the id or name is taken.
    CreateCollection {
        /// Index the collection is inserted at.
        position: usize,
        /// The collection to add.
        collection: CollectionSchema,
    },

    /// Drop the collection at `position`. Carries the full definition so it
    /// can be recreated, and fails unless the stored one matches it.
    DropCollection {
        /// Index the collection occupies.
        position: usize,
        /// The collection to remove.
        collection: CollectionSchema,
    },

    /// Insert a field at `position`.
    AddField {
        /// Target collection identifier.
        collection_id: String,
        /// Insert position, at most the field count.
        position: usize,
        /// The field to add.
        field: FieldSpec,
    },

    /// Remove the field at `position`. Carries the definition so it can be
    /// restored, and fails unless the stored one matches it.
    RemoveField {
        /// Target collection identifier.
        collection_id: String,
        /// Position the field occupies.
        position: usize,
        /// The field to remove.
        field: FieldSpec,
    },
}

impl SchemaChange {
    /// The change that undoes this one.
    pub fn inverse(&self) -> Self {
        match self.clone() {
            Self::CreateCollection {
                position,
                collection,
            } => Self::DropCollection {
                position,
                collection,
            },
            Self::DropCollection {
                position,
                collection,
            } => Self::CreateCollection {
                position,
                collection,
            },
            Self::AddField {
                collection_id,
                position,
                field,
            } => Self::RemoveField {
                collection_id,
                position,
                field,
            },
            Self::RemoveField {
                collection_id,
                position,
                field,
            } => Self::AddField {
                collection_id,
                position,
                field,
            },
        }
    }

    /// Applies this change to `schema`.
    ///
    /// On error the schema is left untouched.
    pub fn apply(&self, schema: &mut Schema) -> Result<()> {
        match self {
            Self::CreateCollection {
                position,
                collection,
            } => {
                if schema
                    .collections
                    .iter()
                    .any(|c| c.id == collection.id || c.name == collection.name)
                {
                    return Err(Error::schema(format!(
                        "Collection '{}' already exists",
                        collection.name
                    )));
                }
                if *position > schema.collections.len() {
                    return Err(Error::schema(format!(
                        "Cannot create collection '{}' at {position}: only {} collections",
                        collection.name,
                        schema.collections.len()
                    )));
                }
                schema.collections.insert(*position, collection.clone());
                Ok(())
            }
            Self::DropCollection {
                position,
                collection,
            } => {
                match schema.collections.get(*position) {
                    Some(stored) if stored == collection => {}
                    Some(stored) if stored.id == collection.id => {
                        return Err(Error::schema(format!(
                            "Collection '{}' does not match the definition being dropped",
                            collection.id
                        )));
                    }
                    _ => {
                        return Err(Error::schema(format!(
                            "Collection '{}' not found at {position}",
                            collection.id
                        )));
                    }
                }
                schema.collections.remove(*position);
                Ok(())
            }
            Self::AddField {
                collection_id,
                position,
                field,
            } => {
                let collection = schema.collection_mut(collection_id)?;
                if collection.fields.iter().any(|f| f.id == field.id) {
                    return Err(Error::schema(format!(
                        "Field '{}' already exists in '{}'",
                        field.id, collection.name
                    )));
                }
                if *position > collection.fields.len() {
                    return Err(Error::schema(format!(
                        "Cannot add field '{}' to '{}' at {position}: only {} fields",
                        field.id,
                        collection.name,
                        collection.fields.len()
                    )));
                }
                collection.fields.insert(*position, field.clone());
                Ok(())
            }
            Self::RemoveField {
                collection_id,
                position,
                field,
            } => {
                let collection = schema.collection_mut(collection_id)?;
                match collection.fields.get(*position) {
                    Some(stored) if stored == field => {}
                    Some(stored) if stored.id == field.id => {
                        return Err(Error::schema(format!(
                            "Field '{}' in '{}' does not match the definition being removed",
                            field.id, collection.name
                        )));
                    }
                    _ => {
                        return Err(Error::schema(format!(
                            "Field '{}' not found at {position} in '{}'",
                            field.id, collection.name
                        )));
                    }
                }
                collection.fields.remove(*position);
                Ok(())
            }
        }
    }

    /// One-line human description.
    pub fn describe(&self) -> String {
        match self {
            Self::CreateCollection { collection, .. } => {
                format!("create collection {}", collection.name)
            }
            Self::DropCollection { collection, .. } => {
                format!("drop collection {}", collection.name)
            }
            Self::AddField {
                collection_id,
                position,
                field,
            } => format!(
                "add {} field '{}' to {} at {}",
                field.kind.type_name(),
                field.name,
                collection_id,
                position
            ),
            Self::RemoveField {
                collection_id,
                field,
                ..
            } => format!(
                "remove {} field '{}' from {}",
                field.kind.type_name(),
                field.name,
                collection_id
            ),
        }
    }
}

// ============================================================================
// Migrations
// ============================================================================

/// A versioned, reversible schema change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Migration {
    /// Monotonic version (creation timestamp).
    pub version: u64,

    /// Short name, e.g. `updated_product_categories`.
    pub name: String,

    /// The forward change.
    pub change: SchemaChange,
}

impl Migration {
    /// Creates a migration.
    pub fn new(version: u64, name: impl Into<String>, change: SchemaChange) -> Self {
        Self {
            version,
            name: name.into(),
            change,
        }
    }

    /// Applies the forward change.
    pub fn up(&self, schema: &mut Schema) -> Result<()> {
        self.change.apply(schema)
    }

    /// Applies the backward change.
    pub fn down(&self, schema: &mut Schema) -> Result<()> {
        self.change.inverse().apply(schema)
    }

    /// `<version>_<name>` label.
    pub fn label(&self) -> String {
        format!("{}_{}", self.version, self.name)
    }
}

/// Applies and rolls back an ordered list of migrations.
#[derive(Debug, Clone)]
pub struct Migrator {
    migrations: Vec<Migration>,
}

impl Migrator {
    /// Creates a migrator. Migrations are ordered by version; versions must
    /// be unique.
    pub fn new(mut migrations: Vec<Migration>) -> Result<Self> {
        migrations.sort_by_key(|m| m.version);
        if let Some(pair) = migrations
            .windows(2)
            .find(|pair| pair[0].version == pair[1].version)
        {
            return Err(Error::schema(format!(
                "Duplicate migration version {}",
                pair[0].version
            )));
        }
        Ok(Self { migrations })
    }

    /// Migrations in application order.
    pub fn migrations(&self) -> &[Migration] {
        &self.migrations
    }

    /// Migrations with a version greater than `applied`.
    pub fn pending(&self, applied: Option<u64>) -> &[Migration] {
        let start = match applied {
            Some(version) => self.migrations.partition_point(|m| m.version <= version),
            None => 0,
        };
        &self.migrations[start..]
    }

    /// Applies every migration newer than `applied`, returning the last
    /// applied version.
    pub fn apply_pending(&self, schema: &mut Schema, applied: Option<u64>) -> Result<Option<u64>> {
        let mut last = applied;
        for migration in self.pending(applied) {
            log::debug!("Applying migration {}", migration.label());
            migration.up(schema)?;
            last = Some(migration.version);
        }
        Ok(last)
    }

    /// Applies every migration in order.
    pub fn apply_all(&self, schema: &mut Schema) -> Result<()> {
        self.apply_pending(schema, None).map(|_| ())
    }

    /// Rolls back every migration newer than `target`, newest first.
    /// `None` rolls back everything.
    pub fn revert_to(&self, schema: &mut Schema, target: Option<u64>) -> Result<()> {
        for migration in self.pending(target).iter().rev() {
            log::debug!("Reverting migration {}", migration.label());
            migration.down(schema)?;
        }
        Ok(())
    }

    /// Rolls back every migration, newest first.
    pub fn revert_all(&self, schema: &mut Schema) -> Result<()> {
        self.revert_to(schema, None)
    }

    /// The schema produced by applying every migration to an empty schema.
    pub fn final_schema(&self) -> Result<Schema> {
        let mut schema = Schema::new();
        self.apply_all(&mut schema)?;
        Ok(schema)
    }
}
