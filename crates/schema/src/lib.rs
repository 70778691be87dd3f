//! Record type declarations for Widerow
//!
//! This crate holds everything that is fixed when a record type is declared:
//! - Column / PrimaryKeyComponent: attribute declarations
//! - TypeSchema: validated, immutable type description with pivot orderings
//! - planner: the key reordering used to emulate secondary indexes
//! - SchemaRegistry: declared types by table name

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod column;
pub mod planner;
pub mod registry;
pub mod type_schema;

pub use column::{Column, PrimaryKeyComponent};
pub use planner::plan_pivot_orderings;
pub use registry::SchemaRegistry;
pub use type_schema::{TypeSchema, TypeSchemaBuilder};
