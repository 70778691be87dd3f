//! Fixtures shared by the engine unit tests

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use widerow_core::{
    ConsumedCapacity, GetRangeRequest, PrimaryKey, RangePage, Result, ReturnKind, Row,
    RowCondition, RowUpdate, StoreClient,
};
use widerow_schema::{Column, PrimaryKeyComponent, TypeSchema};

/// Comic image type: keyed by (id, aid, image_id), with `aid` projected
pub fn comic_img() -> Arc<TypeSchema> {
    TypeSchema::builder("comic_img")
        .primary_key(PrimaryKeyComponent::new("id", 0))
        .primary_key(PrimaryKeyComponent::new("aid", 1).projection_table("comic_img_index_aid"))
        .primary_key(PrimaryKeyComponent::new("image_id", 2))
        .column(Column::new("source_url"))
        .column(Column::structured("tags"))
        .build()
        .unwrap()
}

/// Store double that records every request and replays scripted replies
#[derive(Default)]
pub struct RecordingStore {
    pages: Mutex<VecDeque<RangePage>>,
    get_reply: Mutex<Option<Row>>,
    pub gets: Mutex<Vec<(String, PrimaryKey, Vec<String>)>>,
    pub puts: Mutex<Vec<(String, Row, ReturnKind)>>,
    pub updates: Mutex<Vec<(String, PrimaryKey, RowUpdate, Option<RowCondition>)>>,
    pub ranges: Mutex<Vec<GetRangeRequest>>,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_pages(pages: Vec<RangePage>) -> Arc<Self> {
        let store = Self::default();
        *store.pages.lock() = pages.into();
        Arc::new(store)
    }

    pub fn reply_to_get(&self, row: Option<Row>) {
        *self.get_reply.lock() = row;
    }
}

impl StoreClient for RecordingStore {
    fn get_row(
        &self,
        table: &str,
        primary_key: &PrimaryKey,
        columns_to_get: &[String],
    ) -> Result<(ConsumedCapacity, Option<Row>)> {
        self.gets
            .lock()
            .push((table.to_string(), primary_key.clone(), columns_to_get.to_vec()));
        Ok((ConsumedCapacity::read(1), self.get_reply.lock().clone()))
    }

    fn put_row(
        &self,
        table: &str,
        row: Row,
        return_kind: ReturnKind,
    ) -> Result<(ConsumedCapacity, Option<Row>)> {
        self.puts.lock().push((table.to_string(), row, return_kind));
        Ok((ConsumedCapacity::write(1), None))
    }

    fn update_row(
        &self,
        table: &str,
        primary_key: &PrimaryKey,
        update: RowUpdate,
        condition: Option<RowCondition>,
    ) -> Result<(ConsumedCapacity, Option<Row>)> {
        self.updates
            .lock()
            .push((table.to_string(), primary_key.clone(), update, condition));
        Ok((ConsumedCapacity::write(1), None))
    }

    fn get_range(&self, request: &GetRangeRequest) -> Result<RangePage> {
        self.ranges.lock().push(request.clone());
        Ok(self.pages.lock().pop_front().unwrap_or_default())
    }
}
