//! Point Persistence Tests
//!
//! save / update_not_empty / find_by_pk through a bound MemoryStore.

use crate::common::*;
use std::sync::Arc;

fn key_of(record: &Record) -> Vec<Value> {
    ["id", "aid", "image_id"]
        .iter()
        .map(|name| record.get(name).cloned().unwrap())
        .collect()
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn save_then_find_returns_saved_columns() {
    init_tracing();
    let (_store, session) = comic_session();
    let original = image(1, 445845, 7);
    original.save(&session, ReturnKind::PrimaryKey).unwrap();

    let found = find_by_pk(&session, &comic_img(), &key_of(&original))
        .unwrap()
        .expect("saved row");
    for column in ["source_url", "width", "tags"] {
        assert_eq!(found.get(column), original.get(column), "column {}", column);
    }
    assert_eq!(found, original);
}

#[test]
fn structured_json_survives_round_trip() {
    let (_store, session) = comic_session();
    let mut record = image(2, 10, 1);
    let tags = Value::from(serde_json::json!({
        "authors": ["a", "b"],
        "rating": 4.5,
        "nested": { "ok": true, "none": null }
    }));
    record.set("tags", tags.clone()).unwrap();
    record.save(&session, ReturnKind::None).unwrap();

    let found = find_by_pk(&session, &comic_img(), &key_of(&record))
        .unwrap()
        .unwrap();
    assert_eq!(found.get("tags"), Some(&tags));
}

#[test]
fn save_overwrites_whole_row() {
    let (_store, session) = comic_session();
    image(1, 2, 3).save(&session, ReturnKind::PrimaryKey).unwrap();

    let mut slim = Record::new(comic_img());
    slim.set("id", 1i64).unwrap();
    slim.set("aid", 2i64).unwrap();
    slim.set("image_id", 3i64).unwrap();
    slim.set("width", 10i64).unwrap();
    slim.save(&session, ReturnKind::PrimaryKey).unwrap();

    let found = find_by_pk(&session, &comic_img(), &key_of(&slim))
        .unwrap()
        .unwrap();
    assert_eq!(found.get("width"), Some(&Value::Int(10)));
    assert_eq!(found.get("source_url"), None);
    assert_eq!(found.get("tags"), None);
}

#[test]
fn find_missing_row_is_none() {
    let (_store, session) = comic_session();
    let found = find_by_pk(
        &session,
        &comic_img(),
        &[Value::Int(1), Value::Int(1), Value::Int(1)],
    )
    .unwrap();
    assert!(found.is_none());
}

#[test]
fn find_with_wrong_arity_fails() {
    let (store, session) = comic_session();
    let err = find_by_pk(&session, &comic_img(), &[Value::Int(1), Value::Int(2)]).unwrap_err();
    assert!(matches!(err, Error::KeyArity { expected: 3, actual: 2 }));
    assert_eq!(store.stats().get_row_calls, 0);
}

// ============================================================================
// Key resolution
// ============================================================================

#[test]
fn unset_key_component_gets_configured_sentinel() {
    let store = ScriptedStore::new(vec![]);
    let config = WiderowConfig {
        missing_key: MissingKey::InfMax,
        ..WiderowConfig::default()
    };
    let session = Session::with_config(store.clone(), config);

    let mut record = Record::new(comic_img());
    record.set("id", 1i64).unwrap();
    record.set("image_id", 3i64).unwrap();
    record.save(&session, ReturnKind::PrimaryKey).unwrap();

    let puts = store.puts.lock();
    assert_eq!(
        puts[0].1.primary_key,
        vec![
            ("id".to_string(), KeyCell::from(1i64)),
            ("aid".to_string(), KeyCell::InfMax),
            ("image_id".to_string(), KeyCell::from(3i64)),
        ]
    );
}

#[test]
fn auto_increment_component_is_assigned_by_store() {
    let schema = TypeSchema::builder("events")
        .primary_key(PrimaryKeyComponent::new("stream", 0))
        .primary_key(PrimaryKeyComponent::new("seq", 1).auto_increment())
        .column(Column::new("body"))
        .build()
        .unwrap();
    let store = Arc::new(MemoryStore::new());
    store.create_table("events", ["stream", "seq"]);
    let session = Session::new(store.clone());

    let mut assigned = Vec::new();
    for body in ["a", "b"] {
        let record = Record::new(schema.clone())
            .with("stream", "s1")
            .unwrap()
            .with("body", body)
            .unwrap();
        let outcome = record.save(&session, ReturnKind::PrimaryKey).unwrap();
        let row = outcome.row.unwrap();
        assigned.push(row.key_cell("seq").cloned().unwrap());
    }
    assert_eq!(assigned, vec![KeyCell::from(1i64), KeyCell::from(2i64)]);
    assert_eq!(store.row_count("events"), Some(2));
}

// ============================================================================
// Partial update
// ============================================================================

#[test]
fn update_not_empty_keeps_unset_columns() {
    let (_store, session) = comic_session();
    let original = image(5, 6, 7);
    original.save(&session, ReturnKind::PrimaryKey).unwrap();

    let mut patch = Record::new(comic_img());
    patch.set("id", 5i64).unwrap();
    patch.set("aid", 6i64).unwrap();
    patch.set("image_id", 7i64).unwrap();
    patch.set("width", 0i64).unwrap();
    patch.set("source_url", "https://img.example.com/new.png").unwrap();
    patch.update_not_empty(&session).unwrap();

    let found = find_by_pk(&session, &comic_img(), &key_of(&original))
        .unwrap()
        .unwrap();
    assert_eq!(
        found.get("source_url"),
        Some(&Value::from("https://img.example.com/new.png"))
    );
    assert_eq!(found.get("width"), original.get("width"));
    assert_eq!(found.get("tags"), original.get("tags"));
}

#[test]
fn update_not_empty_creates_missing_row() {
    let (store, session) = comic_session();
    let record = image(8, 8, 8);
    record.update_not_empty(&session).unwrap();
    assert_eq!(store.row_count(COMIC_IMG), Some(1));
    assert_eq!(store.row_count(COMIC_IMG_BY_AID), Some(1));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn unbound_session_fails_every_operation() {
    let session = Session::unbound(WiderowConfig::default());
    let record = image(1, 2, 3);
    assert!(matches!(
        record.save(&session, ReturnKind::PrimaryKey),
        Err(Error::NoClientConfigured)
    ));
    assert!(matches!(
        record.update_not_empty(&session),
        Err(Error::NoClientConfigured)
    ));
    assert!(matches!(
        find_by_pk(&session, &comic_img(), &key_of(&record)),
        Err(Error::NoClientConfigured)
    ));
}

#[test]
fn store_failures_are_surfaced() {
    let session = Session::new(Arc::new(UnavailableStore));
    let err = image(1, 2, 3)
        .save(&session, ReturnKind::PrimaryKey)
        .unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::Unavailable(_))));
}

#[test]
fn missing_table_is_a_store_error() {
    let session = Session::new(Arc::new(MemoryStore::new()));
    let err = image(1, 2, 3)
        .save(&session, ReturnKind::PrimaryKey)
        .unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::NoSuchTable(_))));
}
