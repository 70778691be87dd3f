//! Widerow - typed record mapping over ordered wide-column stores
//!
//! Widerow maps declared record types onto a store that keeps rows sorted by
//! a composite primary key. Each non-leading key component can be given a
//! projection table holding the same rows keyed with that component first,
//! which lets range queries pivot on any component.
//!
//! # Quick Start
//!
//! ```ignore
//! use widerow::{Column, Filter, MemoryStore, PrimaryKeyComponent, RangeQuery, Record, Session, TypeSchema};
//!
//! let schema = TypeSchema::builder("comic_img")
//!     .primary_key(PrimaryKeyComponent::new("id", 0))
//!     .primary_key(PrimaryKeyComponent::new("aid", 1).projection_table("comic_img_index_aid"))
//!     .primary_key(PrimaryKeyComponent::new("image_id", 2))
//!     .column(Column::new("source_url"))
//!     .build()?;
//!
//! let session = Session::new(Arc::new(MemoryStore::new()));
//!
//! let record = Record::new(schema.clone())
//!     .with("id", 1)?
//!     .with("aid", 445845)?
//!     .with("image_id", 3)?;
//! record.save(&session, ReturnKind::PrimaryKey)?;
//!
//! let images = RangeQuery::new(schema.clone())
//!     .filter(Filter::equal(schema.key("aid").unwrap(), 445845))
//!     .execute(&session)?;
//! ```
//!
//! # Architecture
//!
//! - `widerow-core`: values, keys, rows, column conditions, errors and the
//!   `StoreClient` trait
//! - `widerow-schema`: type declarations and the key ordering planner
//! - `widerow-storage`: the in-process `MemoryStore`
//! - `widerow-engine`: records, persistence, predicates, range queries,
//!   sessions and configuration

pub use widerow_core::*;
pub use widerow_engine::*;
pub use widerow_schema::*;
pub use widerow_storage::*;
