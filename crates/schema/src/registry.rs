//! Schema registry
//!
//! Collects the declared record types of an application, keyed by table
//! name. Populate it at startup; it is read-only afterwards and can be shared
//! behind an `Arc`.

use crate::type_schema::TypeSchema;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use widerow_core::SchemaError;

/// Declared record types by table name
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<TypeSchema>>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Register a schema
    ///
    /// Fails if a schema for the same table is already registered.
    pub fn register(&mut self, schema: Arc<TypeSchema>) -> Result<(), SchemaError> {
        let table = schema.table_name().to_string();
        if self.schemas.contains_key(&table) {
            warn!(target: "widerow::schema", table = %table, "Record type already registered");
            return Err(SchemaError::DuplicateTable { table });
        }
        debug!(
            target: "widerow::schema",
            table = %table,
            registered = self.schemas.len() + 1,
            "Record type registered"
        );
        self.schemas.insert(table, schema);
        Ok(())
    }

    /// Look up a schema by table name
    pub fn get(&self, table: &str) -> Option<Arc<TypeSchema>> {
        self.schemas.get(table).cloned()
    }

    /// Iterate over registered schemas (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeSchema>> {
        self.schemas.values()
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
