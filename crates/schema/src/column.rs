//! Attribute declarations: plain columns and primary-key components

/// A plain attribute column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    structured: bool,
}

impl Column {
    /// Declare a scalar column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            structured: false,
        }
    }

    /// Declare a column holding structured (array/object) data
    ///
    /// Structured values are encoded to bytes when written and decoded when
    /// a row is loaded.
    pub fn structured(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            structured: true,
        }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether values are structured data
    pub fn is_structured(&self) -> bool {
        self.structured
    }
}

/// One component of a composite primary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyComponent {
    name: String,
    ordinal: usize,
    auto_increment: bool,
    projection_table: Option<String>,
}

impl PrimaryKeyComponent {
    /// Declare the component at `ordinal` (0 is the leading component)
    pub fn new(name: impl Into<String>, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            ordinal,
            auto_increment: false,
            projection_table: None,
        }
    }

    /// Let the store assign this component when no value is set
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Name the duplicate table physically sorted with this component first
    pub fn projection_table(mut self, table: impl Into<String>) -> Self {
        self.projection_table = Some(table.into());
        self
    }

    /// Component name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in the declared composite key
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Whether the store assigns missing values
    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// Projection table pivoting on this component, if any
    pub fn projection_table_name(&self) -> Option<&str> {
        self.projection_table.as_deref()
    }
}
