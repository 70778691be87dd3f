//! Point persistence: save, update_not_empty and find_by_pk
//!
//! All three resolve the key in the type's declared order and address the
//! leading table. Writes serialize structured columns through the codec.

use crate::codec::encode_column;
use crate::record::Record;
use crate::session::Session;
use std::sync::Arc;
use tracing::debug;
use widerow_core::{
    AttributeColumns, ConsumedCapacity, Error, KeyCell, Result, ReturnKind, Row, RowCondition,
    RowExistence, RowUpdate, Value,
};
use widerow_schema::TypeSchema;

/// What the store reported for a write
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOutcome {
    /// Capacity consumed by the write
    pub consumed: ConsumedCapacity,
    /// Row returned according to the requested return kind
    pub row: Option<Row>,
}

impl Record {
    /// Full-row upsert of this record
    ///
    /// Unset key components are replaced by the session's `missing_key`
    /// sentinel, or left to the store when auto-increment. Columns that
    /// are unset or null are not written, so the stored row drops them.
    pub fn save(&self, session: &Session, return_kind: ReturnKind) -> Result<WriteOutcome> {
        let store = session.store()?;
        let schema = self.schema();
        let primary_key = self.primary_key(None, session.config().missing_key.sentinel())?;
        let columns = self.encoded_columns(|value| !value.is_null())?;

        debug!(
            target: "widerow::record",
            table = %schema.table_name(),
            columns = columns.len(),
            "Saving record"
        );

        let (consumed, row) = store.put_row(
            schema.table_name(),
            Row::new(primary_key, columns),
            return_kind,
        )?;
        Ok(WriteOutcome { consumed, row })
    }

    /// Merge update of the non-empty columns of this record
    ///
    /// Columns holding an empty value (see `Value::is_empty`) are left
    /// untouched in the store.
    pub fn update_not_empty(&self, session: &Session) -> Result<WriteOutcome> {
        let store = session.store()?;
        let schema = self.schema();
        let primary_key = self.primary_key(None, session.config().missing_key.sentinel())?;
        let columns = self.encoded_columns(|value| !value.is_empty())?;

        debug!(
            target: "widerow::record",
            table = %schema.table_name(),
            columns = columns.len(),
            "Updating non-empty columns"
        );

        let (consumed, row) = store.update_row(
            schema.table_name(),
            &primary_key,
            RowUpdate::put(columns),
            Some(RowCondition::new(RowExistence::Ignore)),
        )?;
        Ok(WriteOutcome { consumed, row })
    }

    fn encoded_columns(&self, keep: impl Fn(&Value) -> bool) -> Result<AttributeColumns> {
        let mut columns = Vec::new();
        for column in self.schema().columns() {
            match self.get(column.name()) {
                Some(value) if keep(value) => {
                    columns.push((column.name().to_string(), encode_column(column, value)?));
                }
                _ => {}
            }
        }
        Ok(columns)
    }
}

/// Point read by full primary key
///
/// `values` holds one value per key component in declared order. Returns
/// `Ok(None)` when the row does not exist. Key fields of the returned
/// record are taken from `values`.
pub fn find_by_pk(
    session: &Session,
    schema: &Arc<TypeSchema>,
    values: &[Value],
) -> Result<Option<Record>> {
    let store = session.store()?;
    let components = schema.primary_keys();
    if values.len() != components.len() {
        return Err(Error::KeyArity {
            expected: components.len(),
            actual: values.len(),
        });
    }

    let primary_key = components
        .iter()
        .zip(values)
        .map(|(component, value)| (component.name().to_string(), KeyCell::Value(value.clone())))
        .collect::<Vec<_>>();

    let (_, row) = store.get_row(schema.table_name(), &primary_key, &schema.column_names())?;
    let Some(row) = row else {
        debug!(target: "widerow::record", table = %schema.table_name(), "Row not found");
        return Ok(None);
    };

    let mut record = Record::new(Arc::clone(schema));
    for (name, stored) in row.attribute_columns {
        record.load_column(name, stored)?;
    }
    for (component, value) in components.iter().zip(values) {
        record.load_key(component.name().to_string(), value.clone());
    }
    Ok(Some(record))
}
