//! Range query engine
//!
//! The first key predicate picks the pivot component. The pivot selects
//! both the key ordering and the physical table (the type's own table for
//! the leading component, its projection table otherwise). Start and end
//! keys are filled slot by slot in that ordering: a slot with a predicate
//! takes its bounds, every other slot takes the open sentinels. Column
//! predicates are ANDed into one store-side filter.
//!
//! Pages are requested until the store stops returning a resumption key,
//! or until the session's `max_pages` guard trips. When every slot is pinned
//! to one concrete value the start and end keys coincide, so the row is
//! fetched with a point read instead of an (empty) half-open scan.
//!
//! # Example
//!
//! ```ignore
//! let images = RangeQuery::new(schema.clone())
//!     .filter(Filter::equal(schema.key("aid").unwrap(), 445845))
//!     .limit(100)
//!     .execute(&session)?;
//! ```

use crate::filter::{compose_column_filter, Filter, KeyRange};
use crate::record::Record;
use crate::session::Session;
use std::sync::Arc;
use tracing::{debug, warn};
use widerow_core::{
    ColumnCondition, ConsumedCapacity, Direction, Error, GetRangeRequest, KeyCell, PrimaryKey,
    Result, SchemaError, StoreClient,
};
use widerow_schema::TypeSchema;

/// Resolved physical scan for a query
#[derive(Debug, Clone, PartialEq)]
pub struct ScanBounds {
    /// Table to scan
    pub table: String,
    /// Key ordering of that table
    pub order: Vec<String>,
    /// Inclusive start key
    pub start: PrimaryKey,
    /// Exclusive end key
    pub end: PrimaryKey,
}

impl ScanBounds {
    /// Every slot pinned to the same concrete value at both ends
    pub fn is_point(&self) -> bool {
        self.start == self.end
            && self
                .start
                .iter()
                .all(|(_, cell)| matches!(cell, KeyCell::Value(_)))
    }
}

/// Records returned by a query plus scan statistics
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Materialized records in scan order
    pub records: Vec<Record>,
    /// Number of store requests issued (a point read counts as one)
    pub pages: usize,
    /// Capacity consumed across all pages
    pub consumed: ConsumedCapacity,
}

/// Range query over one record type
#[derive(Debug, Clone)]
pub struct RangeQuery {
    schema: Arc<TypeSchema>,
    key_filters: Vec<KeyRange>,
    column_filters: Vec<Filter>,
    limit: Option<u32>,
}

impl RangeQuery {
    /// Query with no predicates
    pub fn new(schema: Arc<TypeSchema>) -> Self {
        RangeQuery {
            schema,
            key_filters: Vec::new(),
            column_filters: Vec::new(),
            limit: None,
        }
    }

    /// Add a predicate
    ///
    /// The first key predicate added is the pivot.
    pub fn filter(mut self, filter: Filter) -> Self {
        match filter {
            Filter::Key(range) => self.key_filters.push(range),
            column => self.column_filters.push(column),
        }
        self
    }

    /// Per-page row limit
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Queried type
    pub fn schema(&self) -> &Arc<TypeSchema> {
        &self.schema
    }

    /// Resolve the physical table and the start/end keys
    pub fn plan(&self) -> Result<ScanBounds> {
        let pivot = self.key_filters.first().ok_or_else(|| {
            Error::invalid_query("a range query needs at least one key predicate")
        })?;
        if let Some(unknown) = self
            .key_filters
            .iter()
            .find(|range| !self.schema.is_key(&range.component))
        {
            return Err(SchemaError::UnknownAttribute {
                table: self.schema.table_name().to_string(),
                name: unknown.component.clone(),
            }
            .into());
        }

        let order = self.schema.ordering_for(&pivot.component).ok_or_else(|| {
            Error::invalid_query(format!("no key ordering for '{}'", pivot.component))
        })?;
        let table = self
            .schema
            .table_for_pivot(&pivot.component)
            .ok_or_else(|| {
                Error::invalid_query(format!(
                    "key component '{}' has no projection table",
                    pivot.component
                ))
            })?;

        let mut start = Vec::with_capacity(order.len());
        let mut end = Vec::with_capacity(order.len());
        for name in order {
            // First predicate on a component wins
            let (low, high) = match self.key_filters.iter().find(|r| &r.component == name) {
                Some(range) => (range.low.clone(), range.high.clone()),
                None => (KeyCell::InfMin, KeyCell::InfMax),
            };
            start.push((name.clone(), low));
            end.push((name.clone(), high));
        }

        Ok(ScanBounds {
            table: table.to_string(),
            order: order.to_vec(),
            start,
            end,
        })
    }

    /// Store-side filter composed from the column predicates
    pub fn column_filter(&self) -> Option<ColumnCondition> {
        compose_column_filter(&self.column_filters)
    }

    /// Run the query and return the matching records
    pub fn execute(&self, session: &Session) -> Result<Vec<Record>> {
        self.fetch(session).map(|result| result.records)
    }

    /// Run the query and return records with scan statistics
    pub fn fetch(&self, session: &Session) -> Result<QueryResult> {
        let store = session.store()?;
        let bounds = self.plan()?;
        let config = session.config();

        debug!(
            target: "widerow::query",
            table = %bounds.table,
            start = ?bounds.start,
            end = ?bounds.end,
            "Range scan planned"
        );

        let columns = self.schema.column_names();
        if bounds.is_point() {
            return self.fetch_point(store, bounds, &columns);
        }

        let mut request = GetRangeRequest {
            table: bounds.table,
            direction: Direction::Forward,
            start: bounds.start,
            end: bounds.end,
            columns_to_get: columns,
            limit: self.limit.or(config.page_limit),
            column_filter: self.column_filter(),
        };

        let mut rows = Vec::new();
        let mut pages = 0usize;
        let mut consumed = ConsumedCapacity::default();
        loop {
            let page = store.get_range(&request)?;
            pages += 1;
            consumed = consumed.merge(page.consumed);
            debug!(
                target: "widerow::query",
                table = %request.table,
                page = pages,
                rows = page.rows.len(),
                more = page.next_start_primary_key.is_some(),
                "Range page"
            );
            rows.extend(page.rows);

            let Some(next) = page.next_start_primary_key else {
                break;
            };
            if let Some(max_pages) = config.max_pages {
                if pages >= max_pages {
                    warn!(
                        target: "widerow::query",
                        table = %request.table,
                        max_pages,
                        "Range scan still paginating at page limit"
                    );
                    return Err(Error::PaginationLimitExceeded { max_pages });
                }
            }
            request.start = next;
        }

        let records = rows
            .into_iter()
            .map(|row| Record::from_row(Arc::clone(&self.schema), row))
            .collect::<Result<Vec<_>>>()?;
        Ok(QueryResult {
            records,
            pages,
            consumed,
        })
    }

    fn fetch_point(
        &self,
        store: &dyn StoreClient,
        bounds: ScanBounds,
        columns: &[String],
    ) -> Result<QueryResult> {
        debug!(
            target: "widerow::query",
            table = %bounds.table,
            key = ?bounds.start,
            "Point read for fully bound key"
        );
        let (consumed, row) = store.get_row(&bounds.table, &bounds.start, columns)?;
        // get_row takes no filter, so column predicates are checked here
        let filter = self.column_filter();
        let records = row
            .filter(|row| {
                filter
                    .as_ref()
                    .map_or(true, |f| f.matches(&row.attribute_columns))
            })
            .map(|row| Record::from_row(Arc::clone(&self.schema), row))
            .transpose()?
            .into_iter()
            .collect();
        Ok(QueryResult {
            records,
            pages: 1,
            consumed,
        })
    }
}

/// Range query with positional key and column predicates
///
/// `key_filters` must all be key predicates and `column_filters` must all
/// be column predicates.
pub fn query_by_pk(
    session: &Session,
    schema: &Arc<TypeSchema>,
    key_filters: &[Filter],
    column_filters: &[Filter],
    limit: Option<u32>,
) -> Result<Vec<Record>> {
    if key_filters.iter().any(|f| !f.is_key()) {
        return Err(Error::invalid_query(
            "column predicate given where a key predicate is required",
        ));
    }
    if column_filters.iter().any(Filter::is_key) {
        return Err(Error::invalid_query(
            "key predicate given where a column predicate is required",
        ));
    }

    let mut query = RangeQuery::new(Arc::clone(schema));
    for filter in key_filters.iter().chain(column_filters) {
        query = query.filter(filter.clone());
    }
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    query.execute(session)
}
