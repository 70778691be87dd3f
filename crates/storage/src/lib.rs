//! Storage backends for Widerow
//!
//! This crate implements `StoreClient` backends:
//! - MemoryStore: ordered, thread-safe in-process wide-column store with
//!   paging, column filters and auto-increment, used by tests and embedders
//!
//! Network-backed clients live outside this workspace and plug in through
//! the same trait.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;

pub use memory::{MemoryStore, StoreStats, DEFAULT_MAX_PAGE_ROWS};
