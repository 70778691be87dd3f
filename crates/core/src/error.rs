//! Error types for Widerow
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! A point lookup that finds no row is not an error; it is `Ok(None)`.

use thiserror::Error;

/// Result type alias for Widerow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// No store client is bound to the session
    #[error("No store client configured")]
    NoClientConfigured,

    /// Type declaration or attribute validation failed
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Number of key values does not match the declared key components
    #[error("Key arity mismatch: expected {expected} values, got {actual}")]
    KeyArity {
        /// Declared key component count
        expected: usize,
        /// Supplied value count
        actual: usize,
    },

    /// Query could not be planned
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Store client reported a failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Structured value encode/decode failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// Range scan kept returning resumption keys past the page guard
    #[error("Pagination limit exceeded: more than {max_pages} pages")]
    PaginationLimitExceeded {
        /// Configured page guard
        max_pages: usize,
    },
}

impl Error {
    /// Create an invalid query error
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Error::InvalidQuery(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Error::Serialization(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Record type declaration and attribute errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Declaration has an empty table name
    #[error("Table name is missing")]
    MissingTableName,

    /// Declaration has no primary-key component
    #[error("Table '{table}' declares no primary key component")]
    NoPrimaryKey {
        /// Table name
        table: String,
    },

    /// Two components share an ordinal
    #[error("Duplicate primary key ordinal {ordinal}")]
    DuplicateOrdinal {
        /// Repeated ordinal
        ordinal: usize,
    },

    /// Ordinals are not contiguous from zero
    #[error("Primary key ordinals have a gap: expected {expected}, found {found}")]
    OrdinalGap {
        /// Next expected ordinal
        expected: usize,
        /// Ordinal actually found
        found: usize,
    },

    /// A component or column name is declared twice
    #[error("Duplicate attribute name '{name}'")]
    DuplicateName {
        /// Repeated name
        name: String,
    },

    /// The leading component cannot have a projection table
    #[error("Leading key component '{name}' cannot have a projection table")]
    LeadingProjection {
        /// Component name
        name: String,
    },

    /// Attribute is not declared on the type
    #[error("'{name}' is not an attribute of '{table}'")]
    UnknownAttribute {
        /// Table name
        table: String,
        /// Offending attribute name
        name: String,
    },

    /// Structured column given a non-structured value
    #[error("Column '{name}' holds structured data, got {found}")]
    StructuredValueExpected {
        /// Column name
        name: String,
        /// Type name of the rejected value
        found: &'static str,
    },

    /// A registry already holds a schema for this table
    #[error("Table '{table}' is already registered")]
    DuplicateTable {
        /// Table name
        table: String,
    },
}

/// Failures reported by a store client
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Table does not exist
    #[error("No such table: {0}")]
    NoSuchTable(String),

    /// Primary key does not fit the table or the request
    #[error("Invalid primary key: {0}")]
    InvalidPrimaryKey(String),

    /// Row existence or column precondition failed
    #[error("Condition check failed: {0}")]
    ConditionCheckFailed(String),

    /// Store unreachable, throttled or timed out
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create an invalid primary key error
    pub fn invalid_primary_key(msg: impl Into<String>) -> Self {
        StoreError::InvalidPrimaryKey(msg.into())
    }

    /// Create a condition check failure
    pub fn condition_failed(msg: impl Into<String>) -> Self {
        StoreError::ConditionCheckFailed(msg.into())
    }
}
