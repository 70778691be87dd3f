//! Store-native column conditions
//!
//! A wide-column store can filter rows on plain attribute columns while it
//! scans. Conditions are either a single-column comparison or a logical
//! composite of sub-conditions. They are evaluated store-side; `matches`
//! is the reference semantics for in-process stores.

use crate::key::compare_values;
use crate::row::AttributeColumns;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Comparison operator of a single-column condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// `column == value`
    Equal,
    /// `column != value`
    NotEqual,
    /// `column > value`
    GreaterThan,
    /// `column >= value`
    GreaterEqual,
    /// `column < value`
    LessThan,
    /// `column <= value`
    LessEqual,
}

impl Comparator {
    fn accepts(self, ord: Ordering) -> bool {
        match self {
            Comparator::Equal => ord == Ordering::Equal,
            Comparator::NotEqual => ord != Ordering::Equal,
            Comparator::GreaterThan => ord == Ordering::Greater,
            Comparator::GreaterEqual => ord != Ordering::Less,
            Comparator::LessThan => ord == Ordering::Less,
            Comparator::LessEqual => ord != Ordering::Greater,
        }
    }
}

/// Logical operator joining composite sub-conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    /// All sub-conditions must hold
    And,
    /// At least one sub-condition must hold
    Or,
    /// The single sub-condition must not hold
    Not,
}

/// Row filter evaluated by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnCondition {
    /// Compare one column against a value
    Single {
        /// Column name
        column: String,
        /// Value to compare against
        value: Value,
        /// Comparison operator
        comparator: Comparator,
        /// Whether a row lacking the column passes
        pass_if_missing: bool,
    },
    /// Combine sub-conditions
    Composite {
        /// Logical operator
        operator: LogicalOperator,
        /// Sub-conditions
        conditions: Vec<ColumnCondition>,
    },
}

impl ColumnCondition {
    /// Single-column condition; rows lacking the column pass
    pub fn single(column: impl Into<String>, value: Value, comparator: Comparator) -> Self {
        ColumnCondition::Single {
            column: column.into(),
            value,
            comparator,
            pass_if_missing: true,
        }
    }

    /// Conjunction of the given conditions
    pub fn and(conditions: Vec<ColumnCondition>) -> Self {
        ColumnCondition::Composite {
            operator: LogicalOperator::And,
            conditions,
        }
    }

    /// Evaluate against a row's attribute columns
    pub fn matches(&self, columns: &AttributeColumns) -> bool {
        match self {
            ColumnCondition::Single {
                column,
                value,
                comparator,
                pass_if_missing,
            } => match columns.iter().find(|(n, _)| n == column) {
                Some((_, actual)) => comparator.accepts(compare_values(actual, value)),
                None => *pass_if_missing,
            },
            ColumnCondition::Composite {
                operator,
                conditions,
            } => match operator {
                LogicalOperator::And => conditions.iter().all(|c| c.matches(columns)),
                LogicalOperator::Or => conditions.iter().any(|c| c.matches(columns)),
                LogicalOperator::Not => !conditions.iter().all(|c| c.matches(columns)),
            },
        }
    }
}
