//! Conversion between typed records and stored [`Document`]s.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DbError;
use crate::store::Document;

/// Serialize `value` into a [`Document`], dropping `null` members.
///
/// The store never receives an explicit "no value" marker: an absent field
/// is written by omitting its key.
///
/// # Errors
///
/// Returns [`DbError::Serialization`] if serialization fails, or
/// [`DbError::Malformed`] if `value` does not serialize to a JSON object.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, DbError> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            map.retain(|_, v| !v.is_null());
            Ok(map)
        }
        other => Err(DbError::Malformed(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Deserialize a stored [`Document`] into a typed record.
///
/// # Errors
///
/// Returns [`DbError::Serialization`] if the document does not match `T`.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, DbError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

/// Parse a raw JSON string read back from the store.
///
/// # Errors
///
/// Returns [`DbError::Serialization`] for invalid JSON, or
/// [`DbError::Malformed`] if it is not an object.
pub fn parse_document(raw: &str) -> Result<Document, DbError> {
    match serde_json::from_str(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(DbError::Malformed(format!(
            "stored value is not a JSON object: {other}"
        ))),
    }
}
