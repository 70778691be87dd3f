//! Typed records
//!
//! `Entity` connects a plain Rust struct to a declared type. The struct
//! converts itself to and from a `Record`, and gets persistence and
//! querying from the provided methods.
//!
//! # Example
//!
//! ```ignore
//! static COMIC_IMG: Lazy<Arc<TypeSchema>> = Lazy::new(|| {
//!     TypeSchema::builder("comic_img")
//!         .primary_key(PrimaryKeyComponent::new("id", 0))
//!         .primary_key(PrimaryKeyComponent::new("aid", 1).projection_table("comic_img_index_aid"))
//!         .column(Column::new("source_url"))
//!         .build()
//!         .expect("valid schema")
//! });
//!
//! impl Entity for ComicImage {
//!     fn schema() -> Arc<TypeSchema> {
//!         COMIC_IMG.clone()
//!     }
//!     // to_record / from_record
//! }
//! ```

use crate::persist::{find_by_pk, WriteOutcome};
use crate::query::RangeQuery;
use crate::record::Record;
use crate::session::Session;
use std::sync::Arc;
use widerow_core::{Result, ReturnKind, Value};
use widerow_schema::TypeSchema;

/// A Rust type stored as records of one declared type
pub trait Entity: Sized {
    /// Declared type, built once per entity type
    fn schema() -> Arc<TypeSchema>;

    /// Convert to a record
    fn to_record(&self) -> Result<Record>;

    /// Convert from a loaded record
    fn from_record(record: &Record) -> Result<Self>;

    /// Full-row upsert
    fn save(&self, session: &Session) -> Result<WriteOutcome> {
        self.to_record()?.save(session, ReturnKind::default())
    }

    /// Merge update of the non-empty fields
    fn update_not_empty(&self, session: &Session) -> Result<WriteOutcome> {
        self.to_record()?.update_not_empty(session)
    }

    /// Point read by key values in declared order
    fn find_by_pk(session: &Session, values: &[Value]) -> Result<Option<Self>> {
        find_by_pk(session, &Self::schema(), values)?
            .map(|record| Self::from_record(&record))
            .transpose()
    }

    /// Range query over this type
    fn query() -> RangeQuery {
        RangeQuery::new(Self::schema())
    }

    /// Run `query` and convert every record
    fn collect(session: &Session, query: &RangeQuery) -> Result<Vec<Self>> {
        query
            .execute(session)?
            .iter()
            .map(Self::from_record)
            .collect()
    }
}
