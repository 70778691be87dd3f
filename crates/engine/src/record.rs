//! Record: one instance of a declared type
//!
//! A record owns a value per attribute it has been given. Attributes are
//! checked against the type on every write, and structured columns only
//! accept arrays, objects or null. Key resolution turns the record into a
//! store primary key in a chosen pivot ordering.

use crate::codec::{decode_column, decode_json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use widerow_core::{KeyCell, PrimaryKey, Result, Row, SchemaError, Value};
use widerow_schema::TypeSchema;

/// Attribute values for one record of a declared type
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<TypeSchema>,
    values: BTreeMap<String, Value>,
}

impl Record {
    /// Empty record of the given type
    pub fn new(schema: Arc<TypeSchema>) -> Self {
        Record {
            schema,
            values: BTreeMap::new(),
        }
    }

    /// Record initialised from name/value pairs
    ///
    /// Fails on the first name the type does not declare.
    pub fn from_values<I, K, V>(schema: Arc<TypeSchema>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut record = Record::new(schema);
        for (name, value) in values {
            record.set(name.as_ref(), value)?;
        }
        Ok(record)
    }

    /// Declared type
    pub fn schema(&self) -> &Arc<TypeSchema> {
        &self.schema
    }

    /// Value of an attribute, if set
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// All set attribute values
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Set an attribute
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.schema.check_attribute(name)?;
        let value = value.into();
        if let Some(column) = self.schema.column(name) {
            if column.is_structured() && !(value.is_structured() || value.is_null()) {
                return Err(SchemaError::StructuredValueExpected {
                    name: name.to_string(),
                    found: value.type_name(),
                }
                .into());
            }
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Chaining form of `set`
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Set an attribute from JSON text
    pub fn set_json(&mut self, name: &str, text: &str) -> Result<()> {
        let value = decode_json(text)?;
        self.set(name, value)
    }

    /// Clear an attribute, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Resolve the primary key in the ordering for `pivot`
    ///
    /// `None` uses the declared ordering. Components that are unset or
    /// empty become `AutoIncrement` when declared auto-increment and
    /// `default` otherwise.
    pub fn primary_key(&self, pivot: Option<&str>, default: KeyCell) -> Result<PrimaryKey> {
        let pivot = pivot.unwrap_or_else(|| self.schema.leading_key().name());
        let ordering =
            self.schema
                .ordering_for(pivot)
                .ok_or_else(|| SchemaError::UnknownAttribute {
                    table: self.schema.table_name().to_string(),
                    name: pivot.to_string(),
                })?;

        let mut key = Vec::with_capacity(ordering.len());
        for name in ordering {
            let cell = match self.values.get(name) {
                Some(value) if !value.is_empty() => KeyCell::Value(value.clone()),
                _ => match self.schema.key(name) {
                    Some(component) if component.is_auto_increment() => KeyCell::AutoIncrement,
                    _ => default.clone(),
                },
            };
            key.push((name.clone(), cell));
        }
        Ok(key)
    }

    /// Materialize a row read from the store
    ///
    /// Attribute columns are applied first, then key components. Columns
    /// the type does not declare are skipped.
    pub fn from_row(schema: Arc<TypeSchema>, row: Row) -> Result<Self> {
        let mut record = Record::new(schema);
        for (name, stored) in row.attribute_columns {
            record.load_column(name, stored)?;
        }
        for (name, cell) in row.primary_key {
            if let Some(value) = cell.into_value() {
                record.load_key(name, value);
            }
        }
        Ok(record)
    }

    pub(crate) fn load_column(&mut self, name: String, stored: Value) -> Result<()> {
        let Some(column) = self.schema.column(&name) else {
            debug!(
                target: "widerow::record",
                table = %self.schema.table_name(),
                column = %name,
                "Skipping undeclared column"
            );
            return Ok(());
        };
        let value = decode_column(column, stored)?;
        self.values.insert(name, value);
        Ok(())
    }

    pub(crate) fn load_key(&mut self, name: String, value: Value) {
        if self.schema.is_key(&name) {
            self.values.insert(name, value);
        }
    }
}
