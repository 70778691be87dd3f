//! Primary-key cells and composite keys
//!
//! A primary key is an ordered list of `(component name, KeyCell)` pairs. The
//! physical order of the list is the table's key order: two keys compare
//! component by component, left to right.
//!
//! ## Sentinels
//!
//! Range scans need bounds for components the caller did not constrain. The
//! store provides three markers:
//! - `InfMin`: sorts before every value (open lower bound)
//! - `InfMax`: sorts after every value (open upper bound)
//! - `AutoIncrement`: asks the store to assign the component on write
//!
//! ## Ordering
//!
//! `InfMin` < values < `InfMax`. Values of different types order by type rank
//! (Int < String < Bytes < everything else); values of the same type order
//! naturally. Floats use `total_cmp`.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One component value of a primary key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KeyCell {
    /// A concrete component value
    Value(Value),
    /// Open lower bound
    InfMin,
    /// Open upper bound
    InfMax,
    /// Store-assigned value for auto-increment components
    AutoIncrement,
}

/// Composite primary key: component name and cell, in physical order
pub type PrimaryKey = Vec<(String, KeyCell)>;

impl KeyCell {
    /// Check if this cell is a range sentinel (`InfMin` or `InfMax`)
    pub fn is_bound_sentinel(&self) -> bool {
        matches!(self, KeyCell::InfMin | KeyCell::InfMax)
    }

    /// Get the concrete value, if any
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            KeyCell::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Take the concrete value, if any
    pub fn into_value(self) -> Option<Value> {
        match self {
            KeyCell::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Value> for KeyCell {
    fn from(v: Value) -> Self {
        KeyCell::Value(v)
    }
}

impl From<i64> for KeyCell {
    fn from(i: i64) -> Self {
        KeyCell::Value(Value::Int(i))
    }
}

impl From<&str> for KeyCell {
    fn from(s: &str) -> Self {
        KeyCell::Value(Value::from(s))
    }
}

impl From<String> for KeyCell {
    fn from(s: String) -> Self {
        KeyCell::Value(Value::String(s))
    }
}

impl From<Vec<u8>> for KeyCell {
    fn from(b: Vec<u8>) -> Self {
        KeyCell::Value(Value::Bytes(b))
    }
}

impl fmt::Display for KeyCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCell::Value(Value::Int(i)) => write!(f, "{}", i),
            KeyCell::Value(Value::String(s)) => write!(f, "{:?}", s),
            KeyCell::Value(v) => write!(f, "{:?}", v),
            KeyCell::InfMin => f.write_str("INF_MIN"),
            KeyCell::InfMax => f.write_str("INF_MAX"),
            KeyCell::AutoIncrement => f.write_str("AUTO_INCREMENT"),
        }
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Int(_) => 0,
        Value::String(_) => 1,
        Value::Bytes(_) => 2,
        Value::Null => 3,
        Value::Bool(_) => 4,
        Value::Float(_) => 5,
        Value::Array(_) => 6,
        Value::Object(_) => 7,
    }
}

/// Total order over values used for key comparison
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bytes(x), Value::Bytes(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => x.total_cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (l, r) in x.iter().zip(y.iter()) {
                let ord = compare_values(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            for ((lk, lv), (rk, rv)) in x.iter().zip(y.iter()) {
                let ord = lk.cmp(rk).then_with(|| compare_values(lv, rv));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Order two key cells
///
/// `AutoIncrement` only appears in write requests; it sorts with `InfMax`
/// so that a comparison never panics.
pub fn compare_cells(a: &KeyCell, b: &KeyCell) -> Ordering {
    match (a, b) {
        (KeyCell::Value(x), KeyCell::Value(y)) => compare_values(x, y),
        (KeyCell::InfMin, KeyCell::InfMin) => Ordering::Equal,
        (KeyCell::InfMin, _) => Ordering::Less,
        (_, KeyCell::InfMin) => Ordering::Greater,
        (KeyCell::Value(_), _) => Ordering::Less,
        (_, KeyCell::Value(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Order two composite keys positionally, ignoring component names
pub fn compare_keys(a: &[(String, KeyCell)], b: &[(String, KeyCell)]) -> Ordering {
    for ((_, l), (_, r)) in a.iter().zip(b.iter()) {
        let ord = compare_cells(l, r);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}
