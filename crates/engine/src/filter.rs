//! Predicate builder
//!
//! A predicate targets either a primary key component or a plain column.
//! Key predicates become `(low, high)` bounds on the scanned key range;
//! column predicates become store-side `ColumnCondition`s.
//!
//! # Example
//!
//! ```ignore
//! let aid = schema.key("aid").unwrap();
//! let url = schema.column("source_url").unwrap();
//!
//! let query = RangeQuery::new(schema.clone())
//!     .filter(Filter::equal(aid, 445845))
//!     .filter(Filter::not_equal(url, ""));
//! ```

use widerow_core::{ColumnCondition, Comparator, KeyCell, Result, SchemaError, Value};
use widerow_schema::{Column, PrimaryKeyComponent, TypeSchema};

/// What a predicate applies to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target<'a> {
    /// A primary key component
    Key(&'a PrimaryKeyComponent),
    /// An attribute column
    Column(&'a Column),
}

impl<'a> Target<'a> {
    /// Look up `name` on `schema` as a key component or column
    pub fn resolve(schema: &'a TypeSchema, name: &str) -> Result<Self> {
        if let Some(component) = schema.key(name) {
            return Ok(Target::Key(component));
        }
        if let Some(column) = schema.column(name) {
            return Ok(Target::Column(column));
        }
        Err(SchemaError::UnknownAttribute {
            table: schema.table_name().to_string(),
            name: name.to_string(),
        }
        .into())
    }

    /// Attribute name
    pub fn name(&self) -> &'a str {
        match self {
            Target::Key(component) => component.name(),
            Target::Column(column) => column.name(),
        }
    }
}

impl<'a> From<&'a PrimaryKeyComponent> for Target<'a> {
    fn from(component: &'a PrimaryKeyComponent) -> Self {
        Target::Key(component)
    }
}

impl<'a> From<&'a Column> for Target<'a> {
    fn from(column: &'a Column) -> Self {
        Target::Column(column)
    }
}

/// Bounds on one key component
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRange {
    /// Key component name
    pub component: String,
    /// Start-key cell
    pub low: KeyCell,
    /// End-key cell
    pub high: KeyCell,
}

/// One predicate of a range query
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Bounds on a key component
    Key(KeyRange),
    /// Store-side conditions on a column, all of which must hold
    Column(Vec<ColumnCondition>),
}

impl Filter {
    /// Key: `(value, value)`. Column: `= value`.
    pub fn equal<'a>(target: impl Into<Target<'a>>, value: impl Into<Value>) -> Self {
        let value = value.into();
        match target.into() {
            Target::Key(component) => Filter::key(component, value.clone(), value),
            Target::Column(column) => Filter::compare(column, value, Comparator::Equal),
        }
    }

    /// Column `!= value`
    pub fn not_equal(column: &Column, value: impl Into<Value>) -> Self {
        Filter::compare(column, value.into(), Comparator::NotEqual)
    }

    /// Key: `(low, high)`. Column: `> low` and `< high`.
    pub fn between<'a>(
        target: impl Into<Target<'a>>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        let (low, high) = (low.into(), high.into());
        match target.into() {
            Target::Key(component) => Filter::key(component, low, high),
            Target::Column(column) => Filter::Column(vec![
                ColumnCondition::single(column.name(), low, Comparator::GreaterThan),
                ColumnCondition::single(column.name(), high, Comparator::LessThan),
            ]),
        }
    }

    /// Key: `(value, +inf)`. Column: `> value`.
    pub fn greater_than<'a>(target: impl Into<Target<'a>>, value: impl Into<Value>) -> Self {
        let value = value.into();
        match target.into() {
            Target::Key(component) => Filter::Key(KeyRange {
                component: component.name().to_string(),
                low: KeyCell::Value(value),
                high: KeyCell::InfMax,
            }),
            Target::Column(column) => Filter::compare(column, value, Comparator::GreaterThan),
        }
    }

    /// Key: `(-inf, value)`. Column: `< value`.
    pub fn less_than<'a>(target: impl Into<Target<'a>>, value: impl Into<Value>) -> Self {
        let value = value.into();
        match target.into() {
            Target::Key(component) => Filter::Key(KeyRange {
                component: component.name().to_string(),
                low: KeyCell::InfMin,
                high: KeyCell::Value(value),
            }),
            Target::Column(column) => Filter::compare(column, value, Comparator::LessThan),
        }
    }

    /// Whether this is a key predicate
    pub fn is_key(&self) -> bool {
        matches!(self, Filter::Key(_))
    }

    fn key(component: &PrimaryKeyComponent, low: Value, high: Value) -> Self {
        Filter::Key(KeyRange {
            component: component.name().to_string(),
            low: KeyCell::Value(low),
            high: KeyCell::Value(high),
        })
    }

    fn compare(column: &Column, value: Value, comparator: Comparator) -> Self {
        Filter::Column(vec![ColumnCondition::single(column.name(), value, comparator)])
    }
}

/// AND together the conditions of several column predicates
///
/// No conditions gives no filter, a single condition is used as is.
pub fn compose_column_filter(filters: &[Filter]) -> Option<ColumnCondition> {
    let mut conditions: Vec<ColumnCondition> = filters
        .iter()
        .filter_map(|filter| match filter {
            Filter::Column(conditions) => Some(conditions.iter().cloned()),
            Filter::Key(_) => None,
        })
        .flatten()
        .collect();
    match conditions.len() {
        0 => None,
        1 => conditions.pop(),
        _ => Some(ColumnCondition::and(conditions)),
    }
}
