//! Merge-patch decoding
//!
//! A patch body is a JSON object. Each key is matched against the five
//! mutable fields and kept only when its JSON type fits the field: strings
//! for `name`/`manufacturer`, numbers for `height`/`width`/`length`.
//! Unknown keys and mistyped values are dropped without an error. Keys are
//! matched exactly.

use serde_json::{Map, Value};

use super::errors::{DecodeError, DecodeResult};

/// Fields to overwrite on an existing record; `None` means untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FurniturePatch {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub length: Option<f64>,
}

impl FurniturePatch {
    /// Decode a patch from a raw request body.
    ///
    /// `null` is an empty patch. Any other non-object body is rejected.
    pub fn from_json(body: &[u8]) -> DecodeResult<Self> {
        match super::first_value(body)? {
            Value::Null => Ok(Self::default()),
            Value::Object(fields) => Ok(Self::from_fields(&fields)),
            other => Err(DecodeError::WrongShape {
                expected: "object",
                found: super::json_kind(&other),
            }),
        }
    }

    /// Keep the keys whose value type matches the field; drop the rest.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let mut patch = Self::default();
        for (key, value) in fields {
            match (key.as_str(), value) {
                ("name", Value::String(s)) => patch.name = Some(s.clone()),
                ("manufacturer", Value::String(s)) => patch.manufacturer = Some(s.clone()),
                ("height", Value::Number(n)) => patch.height = n.as_f64(),
                ("width", Value::Number(n)) => patch.width = n.as_f64(),
                ("length", Value::Number(n)) => patch.length = n.as_f64(),
                _ => {}
            }
        }
        patch
    }

    /// True when applying this patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.manufacturer.is_none()
            && self.height.is_none()
            && self.width.is_none()
            && self.length.is_none()
    }

    /// Names of the fields this patch overwrites, for logging
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.name.is_some() {
            names.push("name");
        }
        if self.manufacturer.is_some() {
            names.push("manufacturer");
        }
        if self.height.is_some() {
            names.push("height");
        }
        if self.width.is_some() {
            names.push("width");
        }
        if self.length.is_some() {
            names.push("length");
        }
        names
    }
}
