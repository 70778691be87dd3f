//! Configuration Tests
//!
//! Sessions built from a `widerow.toml` on disk.

use crate::common::*;
use std::sync::Arc;
use tempfile::TempDir;
use widerow::CONFIG_FILE_NAME;

#[test]
fn session_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        r#"
missing_key = "inf_max"
page_limit = 3
max_pages = 50

[connection]
endpoint = "https://comics.cn-hangzhou.ots.aliyuncs.com"
access_key_id = "id"
access_key_secret = "secret"
instance_name = "comics"
"#,
    )
    .unwrap();

    let config = WiderowConfig::from_file(&path).unwrap();
    assert_eq!(config.missing_key, MissingKey::InfMax);
    assert_eq!(
        config.connection.as_ref().map(|c| c.instance_name.as_str()),
        Some("comics")
    );

    let store = ScriptedStore::new(vec![]);
    let session = Session::with_config(store.clone(), config);
    let schema = comic_img();
    RangeQuery::new(schema.clone())
        .filter(Filter::equal(schema.key("id").unwrap(), 1i64))
        .execute(&session)
        .unwrap();
    assert_eq!(store.ranges.lock()[0].limit, Some(3));

    Record::new(schema)
        .with("id", 1i64)
        .unwrap()
        .save(&session, ReturnKind::None)
        .unwrap();
    let puts = store.puts.lock();
    assert_eq!(puts[0].1.primary_key[1].1, KeyCell::InfMax);
}

#[test]
fn default_file_is_written_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    WiderowConfig::write_default_if_missing(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, WiderowConfig::default_toml());

    let custom = WiderowConfig {
        page_limit: Some(9),
        ..WiderowConfig::default()
    };
    custom.write_to_file(&path).unwrap();
    WiderowConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(WiderowConfig::from_file(&path).unwrap(), custom);
}

#[test]
fn invalid_connection_is_rejected() {
    let err = WiderowConfig::from_toml_str(
        r#"
[connection]
endpoint = ""
access_key_id = "id"
access_key_secret = "secret"
instance_name = "comics"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn unbound_session_keeps_config() {
    let config = WiderowConfig::from_toml_str("page_limit = 7").unwrap();
    let session = Session::unbound(config);
    assert_eq!(session.config().page_limit, Some(7));
    assert!(matches!(session.store(), Err(Error::NoClientConfigured)));

    let bound = Session::new(Arc::new(MemoryStore::new()));
    assert!(bound.is_bound());
}
