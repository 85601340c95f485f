//! Furniture resource types and their wire decoding
//!
//! - [`Furniture`]: the stored record
//! - [`FurnitureDraft`]: create/replace body (all fields but `id`)
//! - [`FurniturePatch`]: merge-patch body (each field optional)
//!
//! Only the first JSON value of a body is read; anything after it is
//! ignored. Malformed input never reaches the collection.

mod errors;
mod patch;
mod record;

pub use errors::{DecodeError, DecodeResult};
pub use patch::FurniturePatch;
pub use record::{Furniture, FurnitureDraft};

use serde_json::Value;

/// Parse a path segment as a furniture identifier
pub fn parse_id(raw: &str) -> DecodeResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| DecodeError::InvalidId(raw.to_string()))
}

/// Decode the first JSON value in `body`
pub(crate) fn first_value(body: &[u8]) -> DecodeResult<Value> {
    match serde_json::Deserializer::from_slice(body).into_iter::<Value>().next() {
        Some(value) => Ok(value?),
        None => Err(DecodeError::Malformed("empty request body".to_string())),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
