//! MemoryStore: in-process ordered wide-column store
//!
//! This module implements the `StoreClient` trait using:
//! - `BTreeMap<StoredKey, AttributeColumns>` per table for ordered key storage
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` request counters for test assertions
//!
//! # Design Notes
//!
//! - **Physical key order is declared**: `create_table` fixes the component
//!   names and their order; point requests must present exactly that key.
//! - **Range bounds**: `start` is inclusive, `end` exclusive, in both
//!   directions. Sentinels are only legal in range bounds.
//! - **Paging**: a page holds at most `min(limit, max_page_rows)` rows. If
//!   rows remain in range, the page carries the key of the next unscanned row
//!   as its resumption key.
//! - **Auto-increment**: per-table counter, starting at 1.
//! - **Indexes**: `create_index` declares a table keyed by a reordering of
//!   a base table's key. Writes to the base table are mirrored into it,
//!   the way a store-maintained secondary index behaves.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use widerow_core::{
    compare_cells, AttributeColumns, ConsumedCapacity, Direction, GetRangeRequest, KeyCell,
    PrimaryKey, RangePage, Result, ReturnKind, Row, RowCondition, RowExistence, RowUpdate,
    StoreClient, StoreError, Value,
};

/// Default per-page row cap, matching common wide-column store limits
pub const DEFAULT_MAX_PAGE_ROWS: usize = 5000;

/// Key cells in physical order, ordered with sentinel-aware comparison
#[derive(Debug, Clone)]
struct StoredKey(Vec<KeyCell>);

impl PartialEq for StoredKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for StoredKey {}

impl PartialOrd for StoredKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StoredKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (l, r) in self.0.iter().zip(other.0.iter()) {
            let ord = compare_cells(l, r);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

#[derive(Debug)]
struct MemTable {
    key_names: Vec<String>,
    rows: BTreeMap<StoredKey, AttributeColumns>,
    next_auto_increment: i64,
    indexes: Vec<String>,
}

impl MemTable {
    fn new(key_names: Vec<String>) -> Self {
        Self {
            key_names,
            rows: BTreeMap::new(),
            next_auto_increment: 1,
            indexes: Vec::new(),
        }
    }

    /// Check names and arity, returning the bare cells
    fn key_cells(&self, table: &str, key: &PrimaryKey) -> Result<Vec<KeyCell>> {
        if key.len() != self.key_names.len() {
            return Err(StoreError::invalid_primary_key(format!(
                "table '{}' expects {} key components, got {}",
                table,
                self.key_names.len(),
                key.len()
            ))
            .into());
        }
        for ((name, _), expected) in key.iter().zip(self.key_names.iter()) {
            if name != expected {
                return Err(StoreError::invalid_primary_key(format!(
                    "table '{}' expects component '{}', got '{}'",
                    table, expected, name
                ))
                .into());
            }
        }
        Ok(key.iter().map(|(_, cell)| cell.clone()).collect())
    }

    /// Key cells for a point request: no sentinels, optionally no auto-increment
    fn point_cells(&self, table: &str, key: &PrimaryKey, allow_auto: bool) -> Result<Vec<KeyCell>> {
        let cells = self.key_cells(table, key)?;
        for cell in &cells {
            let legal = match cell {
                KeyCell::Value(_) => true,
                KeyCell::AutoIncrement => allow_auto,
                KeyCell::InfMin | KeyCell::InfMax => false,
            };
            if !legal {
                return Err(StoreError::invalid_primary_key(format!(
                    "{} is not allowed in a point request on '{}'",
                    cell, table
                ))
                .into());
            }
        }
        Ok(cells)
    }

    fn named_key(&self, key: &StoredKey) -> PrimaryKey {
        self.key_names.iter().cloned().zip(key.0.iter().cloned()).collect()
    }
}

/// Copy a base row into each index table under its reordered key
fn mirror(
    tables: &mut FxHashMap<String, MemTable>,
    indexes: &[String],
    key: &PrimaryKey,
    columns: &AttributeColumns,
) {
    for index in indexes {
        if let Some(t) = tables.get_mut(index) {
            let cells = t
                .key_names
                .iter()
                .filter_map(|name| key.iter().find(|(n, _)| n == name).map(|(_, c)| c.clone()))
                .collect();
            t.rows.insert(StoredKey(cells), columns.clone());
        }
    }
}

fn project(columns: &AttributeColumns, columns_to_get: &[String]) -> AttributeColumns {
    if columns_to_get.is_empty() {
        return columns.clone();
    }
    columns
        .iter()
        .filter(|(name, _)| columns_to_get.iter().any(|c| c == name))
        .cloned()
        .collect()
}

/// Request counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    /// `get_row` calls
    pub get_row_calls: u64,
    /// `put_row` calls
    pub put_row_calls: u64,
    /// `update_row` calls
    pub update_row_calls: u64,
    /// `get_range` calls
    pub get_range_calls: u64,
}

#[derive(Debug, Default)]
struct Counters {
    get_row: AtomicU64,
    put_row: AtomicU64,
    update_row: AtomicU64,
    get_range: AtomicU64,
}

/// In-process ordered wide-column store
///
/// Thread-safe through `parking_lot::RwLock`; share it behind an `Arc`.
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<FxHashMap<String, MemTable>>,
    max_page_rows: usize,
    counters: Counters,
}

impl MemoryStore {
    /// Create an empty store with the default page cap
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(FxHashMap::default()),
            max_page_rows: DEFAULT_MAX_PAGE_ROWS,
            counters: Counters::default(),
        }
    }

    /// Cap every range page at `rows` rows (at least 1)
    pub fn with_max_page_rows(mut self, rows: usize) -> Self {
        self.max_page_rows = rows.max(1);
        self
    }

    /// Declare a table and its physical key order
    ///
    /// Replaces any existing table of the same name.
    pub fn create_table<S: Into<String>>(&self, name: &str, key_names: impl IntoIterator<Item = S>) {
        let key_names: Vec<String> = key_names.into_iter().map(Into::into).collect();
        debug!(target: "widerow::store", table = %name, keys = ?key_names, "Table created");
        self.tables
            .write()
            .insert(name.to_string(), MemTable::new(key_names));
    }

    /// Declare `index` as a secondary index of `table`
    ///
    /// `key_names` must be a reordering of the base table's key. Existing
    /// rows are copied in, and later writes to `table` are mirrored.
    pub fn create_index<S: Into<String>>(
        &self,
        table: &str,
        index: &str,
        key_names: impl IntoIterator<Item = S>,
    ) -> Result<()> {
        let key_names: Vec<String> = key_names.into_iter().map(Into::into).collect();
        let mut tables = self.tables.write();
        let base = tables
            .get_mut(table)
            .ok_or_else(|| Self::no_such_table(table))?;

        let mut expected = base.key_names.clone();
        let mut given = key_names.clone();
        expected.sort();
        given.sort();
        if expected != given {
            return Err(StoreError::invalid_primary_key(format!(
                "index '{}' must reorder the key of '{}'",
                index, table
            ))
            .into());
        }

        base.indexes.push(index.to_string());
        let existing: Vec<(PrimaryKey, AttributeColumns)> = base
            .rows
            .iter()
            .map(|(key, columns)| (base.named_key(key), columns.clone()))
            .collect();

        debug!(target: "widerow::store", table = %table, index = %index, keys = ?key_names, "Index created");
        tables.insert(index.to_string(), MemTable::new(key_names));
        let indexes = [index.to_string()];
        for (key, columns) in &existing {
            mirror(&mut tables, &indexes, key, columns);
        }
        Ok(())
    }

    /// Number of rows in a table
    pub fn row_count(&self, table: &str) -> Option<usize> {
        self.tables.read().get(table).map(|t| t.rows.len())
    }

    /// Snapshot of the request counters
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            get_row_calls: self.counters.get_row.load(AtomicOrdering::Relaxed),
            put_row_calls: self.counters.put_row.load(AtomicOrdering::Relaxed),
            update_row_calls: self.counters.update_row.load(AtomicOrdering::Relaxed),
            get_range_calls: self.counters.get_range.load(AtomicOrdering::Relaxed),
        }
    }

    fn no_such_table(table: &str) -> widerow_core::Error {
        StoreError::NoSuchTable(table.to_string()).into()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreClient for MemoryStore {
    fn get_row(
        &self,
        table: &str,
        primary_key: &PrimaryKey,
        columns_to_get: &[String],
    ) -> Result<(ConsumedCapacity, Option<Row>)> {
        self.counters.get_row.fetch_add(1, AtomicOrdering::Relaxed);
        let tables = self.tables.read();
        let t = tables.get(table).ok_or_else(|| Self::no_such_table(table))?;
        let key = StoredKey(t.point_cells(table, primary_key, false)?);

        let row = t
            .rows
            .get(&key)
            .map(|columns| Row::new(t.named_key(&key), project(columns, columns_to_get)));
        Ok((ConsumedCapacity::read(1), row))
    }

    fn put_row(
        &self,
        table: &str,
        row: Row,
        return_kind: ReturnKind,
    ) -> Result<(ConsumedCapacity, Option<Row>)> {
        self.counters.put_row.fetch_add(1, AtomicOrdering::Relaxed);
        let mut tables = self.tables.write();
        let t = tables
            .get_mut(table)
            .ok_or_else(|| Self::no_such_table(table))?;
        let mut cells = t.point_cells(table, &row.primary_key, true)?;
        for cell in cells.iter_mut() {
            if matches!(cell, KeyCell::AutoIncrement) {
                *cell = KeyCell::Value(Value::Int(t.next_auto_increment));
                t.next_auto_increment += 1;
            }
        }

        let key = StoredKey(cells);
        let named = t.named_key(&key);
        let returned = match return_kind {
            ReturnKind::None => None,
            ReturnKind::PrimaryKey => Some(Row::new(named.clone(), Vec::new())),
            ReturnKind::AfterModify => {
                Some(Row::new(named.clone(), row.attribute_columns.clone()))
            }
        };
        let indexes = t.indexes.clone();
        t.rows.insert(key, row.attribute_columns.clone());
        mirror(&mut tables, &indexes, &named, &row.attribute_columns);
        Ok((ConsumedCapacity::write(1), returned))
    }

    fn update_row(
        &self,
        table: &str,
        primary_key: &PrimaryKey,
        update: RowUpdate,
        condition: Option<RowCondition>,
    ) -> Result<(ConsumedCapacity, Option<Row>)> {
        self.counters.update_row.fetch_add(1, AtomicOrdering::Relaxed);
        let mut tables = self.tables.write();
        let t = tables
            .get_mut(table)
            .ok_or_else(|| Self::no_such_table(table))?;
        let key = StoredKey(t.point_cells(table, primary_key, false)?);

        let condition = condition.unwrap_or_default();
        let existing = t.rows.get(&key);
        match (condition.existence, existing.is_some()) {
            (RowExistence::ExpectExist, false) => {
                return Err(StoreError::condition_failed("row does not exist").into())
            }
            (RowExistence::ExpectNotExist, true) => {
                return Err(StoreError::condition_failed("row already exists").into())
            }
            _ => {}
        }
        if let (Some(cond), Some(columns)) = (&condition.column_condition, existing) {
            if !cond.matches(columns) {
                return Err(StoreError::condition_failed("column condition not met").into());
            }
        }

        let named = t.named_key(&key);
        let indexes = t.indexes.clone();
        let columns = t.rows.entry(key).or_default();
        for (name, value) in update.put {
            match columns.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => columns.push((name, value)),
            }
        }
        let merged = columns.clone();
        mirror(&mut tables, &indexes, &named, &merged);
        Ok((ConsumedCapacity::write(1), None))
    }

    fn get_range(&self, request: &GetRangeRequest) -> Result<RangePage> {
        self.counters.get_range.fetch_add(1, AtomicOrdering::Relaxed);
        let tables = self.tables.read();
        let t = tables
            .get(&request.table)
            .ok_or_else(|| Self::no_such_table(&request.table))?;
        let start = StoredKey(t.key_cells(&request.table, &request.start)?);
        let end = StoredKey(t.key_cells(&request.table, &request.end)?);

        let page_size = request
            .limit
            .map(|l| l as usize)
            .unwrap_or(usize::MAX)
            .min(self.max_page_rows)
            .max(1);

        let iter: Box<dyn Iterator<Item = (&StoredKey, &AttributeColumns)> + '_> =
            match request.direction {
                Direction::Forward if start < end => Box::new(
                    t.rows
                        .range((Bound::Included(&start), Bound::Excluded(&end))),
                ),
                Direction::Backward if end < start => Box::new(
                    t.rows
                        .range((Bound::Excluded(&end), Bound::Included(&start)))
                        .rev(),
                ),
                _ => Box::new(std::iter::empty()),
            };

        let mut rows = Vec::new();
        let mut scanned = 0u64;
        let mut next_start_primary_key = None;
        for (key, columns) in iter {
            if rows.len() == page_size {
                next_start_primary_key = Some(t.named_key(key));
                break;
            }
            scanned += 1;
            let passes = request
                .column_filter
                .as_ref()
                .map_or(true, |f| f.matches(columns));
            if passes {
                rows.push(Row::new(
                    t.named_key(key),
                    project(columns, &request.columns_to_get),
                ));
            }
        }

        Ok(RangePage {
            consumed: ConsumedCapacity::read(scanned.max(1)),
            next_start_primary_key,
            rows,
            next_token: None,
        })
    }
}
