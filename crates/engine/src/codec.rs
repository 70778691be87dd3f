//! Structured column encoding
//!
//! Columns declared structured hold arrays or objects in memory and UTF-8
//! JSON bytes in the store. Encoding happens when a record is written and
//! decoding when a row is loaded, never in between.

use widerow_core::{Error, Result, Value};
use widerow_schema::Column;

/// Serialize a structured value to JSON bytes
pub fn encode_structured(value: &Value) -> Result<Vec<u8>> {
    let json = serde_json::Value::from(value.clone());
    Ok(serde_json::to_vec(&json)?)
}

/// Parse JSON text into a value
pub fn decode_json(text: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    Ok(Value::from(json))
}

/// Turn a stored structured column back into its in-memory form
///
/// Accepts JSON as bytes or as a string. Values that are already structured
/// or null pass through.
pub fn decode_structured(stored: Value) -> Result<Value> {
    match stored {
        Value::Bytes(bytes) => {
            let json: serde_json::Value = serde_json::from_slice(&bytes)?;
            Ok(Value::from(json))
        }
        Value::String(text) => decode_json(&text),
        Value::Null | Value::Array(_) | Value::Object(_) => Ok(stored),
        other => Err(Error::serialization(format!(
            "cannot decode {} as structured data",
            other.type_name()
        ))),
    }
}

/// Value as written to the store for `column`
pub fn encode_column(column: &Column, value: &Value) -> Result<Value> {
    if column.is_structured() && value.is_structured() {
        Ok(Value::Bytes(encode_structured(value)?))
    } else {
        Ok(value.clone())
    }
}

/// Value as loaded from the store for `column`
pub fn decode_column(column: &Column, stored: Value) -> Result<Value> {
    if column.is_structured() {
        decode_structured(stored)
    } else {
        Ok(stored)
    }
}
