//! Row-level types exchanged with a store client
//!
//! These mirror the request/response shapes of an ordered wide-column store:
//! rows addressed by a composite primary key and carrying named attribute
//! columns, plus the knobs that point writes and range scans accept.

use crate::condition::ColumnCondition;
use crate::key::{KeyCell, PrimaryKey};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Attribute columns of a row, in store order
pub type AttributeColumns = Vec<(String, Value)>;

/// A stored row: primary key plus attribute columns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    /// Primary key in the table's physical order
    pub primary_key: PrimaryKey,
    /// Attribute columns
    pub attribute_columns: AttributeColumns,
}

impl Row {
    /// Create a row from its key and attributes
    pub fn new(primary_key: PrimaryKey, attribute_columns: AttributeColumns) -> Self {
        Self {
            primary_key,
            attribute_columns,
        }
    }

    /// Look up an attribute column by name
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attribute_columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Look up a primary-key component by name
    pub fn key_cell(&self, name: &str) -> Option<&KeyCell> {
        self.primary_key
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }
}

/// Capacity units a request consumed, as reported by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsumedCapacity {
    /// Read capacity units
    pub read: u64,
    /// Write capacity units
    pub write: u64,
}

impl ConsumedCapacity {
    /// Capacity for a read-only request
    pub fn read(units: u64) -> Self {
        Self { read: units, write: 0 }
    }

    /// Capacity for a write-only request
    pub fn write(units: u64) -> Self {
        Self { read: 0, write: units }
    }

    /// Sum two capacity reports
    pub fn merge(self, other: Self) -> Self {
        Self {
            read: self.read + other.read,
            write: self.write + other.write,
        }
    }
}

/// What a put should hand back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReturnKind {
    /// Nothing
    None,
    /// The written row's primary key (with auto-increment values resolved)
    #[default]
    PrimaryKey,
    /// The primary key and the columns the write modified
    AfterModify,
}

/// Scan direction for range reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending key order; `start` is inclusive, `end` exclusive
    Forward,
    /// Descending key order; `start` is inclusive, `end` exclusive
    Backward,
}

/// Row existence expectation checked before a write applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowExistence {
    /// Write regardless of whether the row exists
    #[default]
    Ignore,
    /// Fail unless the row exists
    ExpectExist,
    /// Fail if the row exists
    ExpectNotExist,
}

/// Write precondition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowCondition {
    /// Existence expectation
    pub existence: RowExistence,
    /// Optional column condition the existing row must satisfy
    pub column_condition: Option<ColumnCondition>,
}

impl RowCondition {
    /// Condition with only an existence expectation
    pub fn new(existence: RowExistence) -> Self {
        Self {
            existence,
            column_condition: None,
        }
    }
}

/// Merge-style update: columns to overwrite, everything else untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowUpdate {
    /// Columns to PUT
    pub put: AttributeColumns,
}

impl RowUpdate {
    /// Update that puts the given columns
    pub fn put(columns: AttributeColumns) -> Self {
        Self { put: columns }
    }
}

/// A single ordered range read
#[derive(Debug, Clone, PartialEq)]
pub struct GetRangeRequest {
    /// Table to scan
    pub table: String,
    /// Scan direction
    pub direction: Direction,
    /// Inclusive start key
    pub start: PrimaryKey,
    /// Exclusive end key
    pub end: PrimaryKey,
    /// Attribute columns to return; empty means all
    pub columns_to_get: Vec<String>,
    /// Maximum rows in this page
    pub limit: Option<u32>,
    /// Store-side row filter
    pub column_filter: Option<ColumnCondition>,
}

/// One page of a range read
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangePage {
    /// Capacity consumed by this page
    pub consumed: ConsumedCapacity,
    /// Where the next page starts; `None` once the range is exhausted
    pub next_start_primary_key: Option<PrimaryKey>,
    /// Rows in this page, in scan order
    pub rows: Vec<Row>,
    /// Opaque continuation token, if the store issues one
    pub next_token: Option<Vec<u8>>,
}
