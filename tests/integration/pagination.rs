//! Pagination Tests
//!
//! Resumption-key loops against scripted pages and against a MemoryStore
//! with a small page cap.

use crate::common::*;
use std::sync::Arc;

fn row(id: i64) -> Row {
    Row::new(
        vec![
            ("id".to_string(), KeyCell::from(id)),
            ("aid".to_string(), KeyCell::from(1i64)),
            ("image_id".to_string(), KeyCell::from(1i64)),
        ],
        vec![("width".to_string(), Value::Int(id * 100))],
    )
}

#[test]
fn two_pages_are_concatenated_in_order() {
    let k1 = vec![
        ("id".to_string(), KeyCell::from(3i64)),
        ("aid".to_string(), KeyCell::InfMin),
        ("image_id".to_string(), KeyCell::InfMin),
    ];
    let store = ScriptedStore::new(vec![
        RangePage {
            rows: vec![row(1), row(2)],
            next_start_primary_key: Some(k1.clone()),
            ..RangePage::default()
        },
        RangePage {
            rows: vec![row(3)],
            next_start_primary_key: None,
            ..RangePage::default()
        },
    ]);
    let session = Session::new(store.clone());
    let schema = comic_img();

    let records = RangeQuery::new(schema.clone())
        .filter(Filter::greater_than(schema.key("id").unwrap(), 0i64))
        .execute(&session)
        .unwrap();

    let widths: Vec<i64> = records.iter().map(|r| int(r, "width")).collect();
    assert_eq!(widths, vec![100, 200, 300]);

    let ranges = store.ranges.lock();
    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[1].start, k1);
    assert_eq!(ranges[1].end, ranges[0].end);
}

#[test]
fn memory_store_page_cap_forces_pagination() {
    let store = Arc::new(MemoryStore::new().with_max_page_rows(4));
    store.create_table(COMIC_IMG, ["id", "aid", "image_id"]);
    let session = Session::new(store.clone());
    let records: Vec<Record> = (1..=10).map(|i| image(i, 7, 1)).collect();
    save_all(&session, &records);

    let schema = comic_img();
    let result = RangeQuery::new(schema.clone())
        .filter(Filter::greater_than(schema.key("id").unwrap(), 1i64))
        .fetch(&session)
        .unwrap();

    assert_eq!(result.records.len(), 10);
    assert_eq!(result.pages, 3);
    assert_eq!(store.stats().get_range_calls, 3);
    let ids: Vec<i64> = result.records.iter().map(|r| int(r, "id")).collect();
    assert_eq!(ids, (1..=10i64).collect::<Vec<_>>());
    assert!(result.consumed.read >= 10);
}

#[test]
fn query_limit_sets_page_size() {
    let (store, session) = comic_session();
    let records: Vec<Record> = (1..=5).map(|i| image(i, 9, i)).collect();
    save_all(&session, &records);

    let schema = comic_img();
    let result = RangeQuery::new(schema.clone())
        .filter(Filter::equal(schema.key("aid").unwrap(), 9i64))
        .limit(2)
        .fetch(&session)
        .unwrap();
    assert_eq!(result.records.len(), 5);
    assert_eq!(result.pages, 3);
    assert_eq!(store.stats().get_range_calls, 3);
}

#[test]
fn page_guard_stops_runaway_scan() {
    let resume = vec![("id".to_string(), KeyCell::from(1i64))];
    let pages = (0..10)
        .map(|_| RangePage {
            rows: vec![row(1)],
            next_start_primary_key: Some(resume.clone()),
            ..RangePage::default()
        })
        .collect();
    let store = ScriptedStore::new(pages);
    let config = WiderowConfig::from_toml_str("max_pages = 4").unwrap();
    let session = Session::with_config(store.clone(), config);
    let schema = comic_img();

    let err = RangeQuery::new(schema.clone())
        .filter(Filter::greater_than(schema.key("id").unwrap(), 0i64))
        .execute(&session)
        .unwrap_err();
    assert!(matches!(err, Error::PaginationLimitExceeded { max_pages: 4 }));
    assert_eq!(store.ranges.lock().len(), 4);
}

#[test]
fn page_guard_allows_scan_that_finishes_in_time() {
    let (store, seeding) = comic_session();
    save_all(&seeding, &(1..=6).map(|i| image(i, 3, 1)).collect::<Vec<_>>());
    let config = WiderowConfig {
        page_limit: Some(2),
        max_pages: Some(3),
        ..WiderowConfig::default()
    };
    let session = Session::with_config(store, config);
    let schema = comic_img();

    let records = RangeQuery::new(schema.clone())
        .filter(Filter::equal(schema.key("aid").unwrap(), 3i64))
        .execute(&session)
        .unwrap();
    assert_eq!(records.len(), 6);
}
