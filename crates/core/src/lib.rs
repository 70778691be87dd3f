//! Core types and traits for Widerow
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: Unified value enum for attributes and key components
//! - KeyCell / PrimaryKey: Composite keys with range and auto-increment sentinels
//! - Row and request types: what a store client reads and writes
//! - ColumnCondition: Store-side row filters
//! - Error: Error type hierarchy
//! - StoreClient: The store boundary trait

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod condition;
pub mod error;
pub mod key;
pub mod row;
pub mod traits;
pub mod value;

pub use condition::{ColumnCondition, Comparator, LogicalOperator};
pub use error::{Error, Result, SchemaError, StoreError};
pub use key::{compare_cells, compare_keys, compare_values, KeyCell, PrimaryKey};
pub use row::{
    AttributeColumns, ConsumedCapacity, Direction, GetRangeRequest, RangePage, ReturnKind, Row,
    RowCondition, RowExistence, RowUpdate,
};
pub use traits::StoreClient;
pub use value::Value;
