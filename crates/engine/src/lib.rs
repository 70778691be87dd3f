//! Record mapping and range queries for Widerow
//!
//! This crate turns declared types into store operations:
//! - Record: attribute values validated against a `TypeSchema`
//! - persist: save, update_not_empty and find_by_pk
//! - Filter: key bounds and column conditions
//! - RangeQuery: pivot-table range scans with pagination
//! - Session / WiderowConfig: the store binding and its configuration
//! - Entity: typed records on top of `Record`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod entity;
pub mod filter;
pub mod persist;
pub mod query;
pub mod record;
pub mod session;

#[cfg(test)]
mod test_support;

pub use config::{ConnectionConfig, MissingKey, WiderowConfig, CONFIG_FILE_NAME};
pub use entity::Entity;
pub use filter::{compose_column_filter, Filter, KeyRange, Target};
pub use persist::{find_by_pk, WriteOutcome};
pub use query::{query_by_pk, QueryResult, RangeQuery, ScanBounds};
pub use record::Record;
pub use session::Session;
