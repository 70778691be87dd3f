//! Store client abstraction
//!
//! The mapping layer never talks to a store directly. It drives this trait,
//! which captures the four primitives an ordered wide-column store offers:
//! point get, full-row put, merge update, and ordered range scan.
//!
//! Wire protocol, retries and credentials belong to the implementation.

use crate::error::Result;
use crate::key::PrimaryKey;
use crate::row::{ConsumedCapacity, GetRangeRequest, RangePage, ReturnKind, Row, RowCondition, RowUpdate};

/// Ordered wide-column store operations
///
/// Thread safety: implementations are shared behind `Arc` across threads
/// (requires Send + Sync).
pub trait StoreClient: Send + Sync {
    /// Point read of one row
    ///
    /// Returns `None` when the row does not exist. `columns_to_get` empty
    /// means all attribute columns.
    fn get_row(
        &self,
        table: &str,
        primary_key: &PrimaryKey,
        columns_to_get: &[String],
    ) -> Result<(ConsumedCapacity, Option<Row>)>;

    /// Full-row upsert
    ///
    /// Replaces every attribute column of the row. The returned row follows
    /// `return_kind`.
    fn put_row(
        &self,
        table: &str,
        row: Row,
        return_kind: ReturnKind,
    ) -> Result<(ConsumedCapacity, Option<Row>)>;

    /// Merge-style update
    ///
    /// Writes only the columns in `update`, leaving the others untouched.
    /// Creates the row if it is missing and the condition allows it.
    fn update_row(
        &self,
        table: &str,
        primary_key: &PrimaryKey,
        update: RowUpdate,
        condition: Option<RowCondition>,
    ) -> Result<(ConsumedCapacity, Option<Row>)>;

    /// Read one page of an ordered key range
    fn get_range(&self, request: &GetRangeRequest) -> Result<RangePage>;
}
