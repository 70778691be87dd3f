//! Entity and Registry Tests
//!
//! A typed struct mapped through `Entity`, with its schema built once and
//! registered alongside others.

use crate::common::*;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::thread;

static COMIC_IMG_SCHEMA: Lazy<Arc<TypeSchema>> = Lazy::new(comic_img);

#[derive(Debug, Clone, PartialEq)]
struct ComicImage {
    id: i64,
    aid: i64,
    image_id: i64,
    source_url: String,
    tags: Vec<String>,
}

impl Entity for ComicImage {
    fn schema() -> Arc<TypeSchema> {
        COMIC_IMG_SCHEMA.clone()
    }

    fn to_record(&self) -> Result<Record> {
        let tags = self.tags.iter().map(|t| Value::from(t.as_str())).collect::<Vec<_>>();
        Record::new(Self::schema())
            .with("id", self.id)?
            .with("aid", self.aid)?
            .with("image_id", self.image_id)?
            .with("source_url", self.source_url.as_str())?
            .with("tags", tags)
    }

    fn from_record(record: &Record) -> Result<Self> {
        let int = |name: &str| {
            record
                .get(name)
                .and_then(Value::as_int)
                .ok_or_else(|| Error::serialization(format!("'{}' is not set", name)))
        };
        let tags = record
            .get("tags")
            .and_then(Value::as_array)
            .unwrap_or_default()
            .iter()
            .filter_map(|t| t.as_str().map(str::to_string))
            .collect();
        Ok(ComicImage {
            id: int("id")?,
            aid: int("aid")?,
            image_id: int("image_id")?,
            source_url: record
                .get("source_url")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            tags,
        })
    }
}

fn comic(id: i64, aid: i64, image_id: i64) -> ComicImage {
    ComicImage {
        id,
        aid,
        image_id,
        source_url: format!("https://img.example.com/{}.png", image_id),
        tags: vec!["comic".into(), format!("page-{}", image_id)],
    }
}

#[test]
fn typed_save_find_and_query() {
    let (_store, session) = comic_session();
    let images = [comic(1, 50, 1), comic(1, 50, 2), comic(2, 51, 1)];
    for image in &images {
        image.save(&session).unwrap();
    }

    let found = ComicImage::find_by_pk(&session, &[Value::Int(1), Value::Int(50), Value::Int(2)])
        .unwrap();
    assert_eq!(found, Some(images[1].clone()));

    let schema = ComicImage::schema();
    let query = ComicImage::query().filter(Filter::equal(schema.key("aid").unwrap(), 50i64));
    let by_aid = ComicImage::collect(&session, &query).unwrap();
    assert_eq!(by_aid, images[..2].to_vec());
}

#[test]
fn schema_is_built_once() {
    assert!(Arc::ptr_eq(&ComicImage::schema(), &ComicImage::schema()));
}

#[test]
fn sessions_are_shared_across_threads() {
    let (store, session) = comic_session();
    let handles: Vec<_> = (1..=4i64)
        .map(|t| {
            let session = session.clone();
            thread::spawn(move || {
                for i in 1..=25i64 {
                    comic(t, 70, i).save(&session).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.row_count(COMIC_IMG), Some(100));
    let schema = ComicImage::schema();
    let query = ComicImage::query().filter(Filter::equal(schema.key("aid").unwrap(), 70i64));
    assert_eq!(ComicImage::collect(&session, &query).unwrap().len(), 100);
}

#[test]
fn registry_holds_declared_types() {
    let mut registry = SchemaRegistry::new();
    registry.register(ComicImage::schema()).unwrap();
    let chapters = TypeSchema::builder("chapter")
        .primary_key(PrimaryKeyComponent::new("comic_id", 0))
        .build()
        .unwrap();
    registry.register(chapters).unwrap();

    assert_eq!(registry.len(), 2);
    assert!(Arc::ptr_eq(
        &registry.get(COMIC_IMG).unwrap(),
        &ComicImage::schema()
    ));
    let err = registry.register(comic_img()).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateTable { .. }));
}
