//! Record type declarations
//!
//! A `TypeSchema` is built once per record type with `TypeSchemaBuilder` and
//! is immutable afterwards. Building validates the declaration and runs the
//! key ordering planner, so every schema carries one pivot ordering per
//! primary-key component.
//!
//! # Example
//!
//! ```
//! use widerow_schema::{Column, PrimaryKeyComponent, TypeSchema};
//!
//! let schema = TypeSchema::builder("comic_img")
//!     .primary_key(PrimaryKeyComponent::new("id", 0))
//!     .primary_key(PrimaryKeyComponent::new("aid", 1).projection_table("comic_img_index_aid"))
//!     .primary_key(PrimaryKeyComponent::new("image_id", 2))
//!     .column(Column::new("source_url"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.ordering_for("aid").unwrap(), ["aid", "id", "image_id"]);
//! ```

use crate::column::{Column, PrimaryKeyComponent};
use crate::planner::plan_pivot_orderings;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;
use widerow_core::SchemaError;

/// Immutable description of one record type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSchema {
    table_name: String,
    primary_keys: Vec<PrimaryKeyComponent>,
    columns: Vec<Column>,
    pivot_orderings: HashMap<String, Vec<String>>,
}

impl TypeSchema {
    /// Start declaring a record type stored in `table_name`
    pub fn builder(table_name: impl Into<String>) -> TypeSchemaBuilder {
        TypeSchemaBuilder {
            table_name: table_name.into(),
            primary_keys: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Leading table name
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Primary-key components in declared order
    pub fn primary_keys(&self) -> &[PrimaryKeyComponent] {
        &self.primary_keys
    }

    /// The leading (physical) key component
    pub fn leading_key(&self) -> &PrimaryKeyComponent {
        // build() guarantees at least one component
        &self.primary_keys[0]
    }

    /// Plain columns in declaration order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Primary-key component names in declared order
    pub fn key_names(&self) -> Vec<String> {
        self.primary_keys.iter().map(|k| k.name().to_string()).collect()
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Look up a primary-key component
    pub fn key(&self, name: &str) -> Option<&PrimaryKeyComponent> {
        self.primary_keys.iter().find(|k| k.name() == name)
    }

    /// Look up a plain column
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Whether `name` is a primary-key component
    pub fn is_key(&self, name: &str) -> bool {
        self.key(name).is_some()
    }

    /// Whether `name` is a declared column
    pub fn is_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Whether `name` is a key component or column of this type
    pub fn contains(&self, name: &str) -> bool {
        self.is_key(name) || self.is_column(name)
    }

    /// Fail with `UnknownAttribute` unless `name` is declared
    pub fn check_attribute(&self, name: &str) -> Result<(), SchemaError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(SchemaError::UnknownAttribute {
                table: self.table_name.clone(),
                name: name.to_string(),
            })
        }
    }

    /// Full key ordering with `pivot` first
    pub fn ordering_for(&self, pivot: &str) -> Option<&[String]> {
        self.pivot_orderings.get(pivot).map(Vec::as_slice)
    }

    /// All pivot orderings
    pub fn pivot_orderings(&self) -> &HashMap<String, Vec<String>> {
        &self.pivot_orderings
    }

    /// Physical table to scan when pivoting on `pivot`
    ///
    /// The leading component maps to the type's own table; any other
    /// component maps to its projection table, if one was declared.
    pub fn table_for_pivot(&self, pivot: &str) -> Option<&str> {
        let component = self.key(pivot)?;
        if component.ordinal() == 0 {
            Some(&self.table_name)
        } else {
            component.projection_table_name()
        }
    }
}

/// Builder for `TypeSchema`
#[derive(Debug, Clone)]
pub struct TypeSchemaBuilder {
    table_name: String,
    primary_keys: Vec<PrimaryKeyComponent>,
    columns: Vec<Column>,
}

impl TypeSchemaBuilder {
    /// Add a primary-key component
    pub fn primary_key(mut self, component: PrimaryKeyComponent) -> Self {
        self.primary_keys.push(component);
        self
    }

    /// Add a plain column
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Validate the declaration and plan pivot orderings
    pub fn build(self) -> Result<Arc<TypeSchema>, SchemaError> {
        if self.table_name.trim().is_empty() {
            return Err(SchemaError::MissingTableName);
        }
        if self.primary_keys.is_empty() {
            return Err(SchemaError::NoPrimaryKey {
                table: self.table_name,
            });
        }

        let mut primary_keys = self.primary_keys;
        primary_keys.sort_by_key(|k| k.ordinal());
        for (expected, component) in primary_keys.iter().enumerate() {
            let found = component.ordinal();
            if found < expected {
                return Err(SchemaError::DuplicateOrdinal { ordinal: found });
            }
            if found > expected {
                return Err(SchemaError::OrdinalGap { expected, found });
            }
        }

        let mut seen = HashSet::new();
        let names = primary_keys
            .iter()
            .map(PrimaryKeyComponent::name)
            .chain(self.columns.iter().map(Column::name));
        for name in names {
            if !seen.insert(name) {
                return Err(SchemaError::DuplicateName {
                    name: name.to_string(),
                });
            }
        }

        let leading = &primary_keys[0];
        if leading.projection_table_name().is_some() {
            return Err(SchemaError::LeadingProjection {
                name: leading.name().to_string(),
            });
        }

        let key_names: Vec<String> = primary_keys.iter().map(|k| k.name().to_string()).collect();
        let pivot_orderings = plan_pivot_orderings(&key_names);

        debug!(
            target: "widerow::schema",
            table = %self.table_name,
            keys = ?key_names,
            columns = self.columns.len(),
            "Record type declared"
        );

        Ok(Arc::new(TypeSchema {
            table_name: self.table_name,
            primary_keys,
            columns: self.columns,
            pivot_orderings,
        }))
    }
}
