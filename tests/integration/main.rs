//! Integration Tests
//!
//! End-to-end tests through the public `widerow` facade, organized by area:
//! - persistence: save, update_not_empty, find_by_pk against MemoryStore
//! - pivot_query: range queries on the leading table and on projections
//! - pagination: resumption keys, page caps and the page guard
//! - entity: typed records and the schema registry
//! - config: widerow.toml loading and sessions built from it

#[path = "../common/mod.rs"]
mod common;

mod config;
mod entity;
mod pagination;
mod persistence;
