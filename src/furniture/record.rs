//! Furniture record and create/replace draft

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{DecodeError, DecodeResult};
use super::patch::FurniturePatch;

/// A stored furniture item.
///
/// Field order here is the key order in the snapshot file and in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Furniture {
    /// Assigned by the store, never reused
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub length: f64,
}

impl Furniture {
    /// Build a record from a draft under the given identifier
    pub fn from_draft(id: i64, draft: FurnitureDraft) -> Self {
        Self {
            id,
            name: draft.name,
            manufacturer: draft.manufacturer,
            height: draft.height,
            width: draft.width,
            length: draft.length,
        }
    }

    /// Overwrite every field present in `patch`. The identifier never changes.
    pub fn apply_patch(&mut self, patch: &FurniturePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(manufacturer) = &patch.manufacturer {
            self.manufacturer = manufacturer.clone();
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(length) = patch.length {
            self.length = length;
        }
    }
}

/// Every field of a record except the identifier.
///
/// Missing fields decode to their zero value and `null` values are skipped. Keys match
/// field names ignoring ASCII case, with an exact match taking precedence.
/// Unknown keys (an `id` in the body included) are ignored. A known field
/// with the wrong JSON type fails the whole decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FurnitureDraft {
    pub name: String,
    pub manufacturer: String,
    pub height: f64,
    pub width: f64,
    pub length: f64,
}

const DRAFT_FIELDS: [&str; 5] = ["name", "manufacturer", "height", "width", "length"];

impl FurnitureDraft {
    /// Decode a draft from a raw request body
    pub fn from_json(body: &[u8]) -> DecodeResult<Self> {
        match super::first_value(body)? {
            Value::Object(fields) => Self::from_fields(&fields),
            other => Err(DecodeError::WrongShape {
                expected: "object",
                found: super::json_kind(&other),
            }),
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> DecodeResult<Self> {
        // Case-folded keys first so an exact key overwrites them.
        let mut matched: Vec<(&str, &Value)> = Vec::new();
        for exact in [false, true] {
            for (key, value) in fields {
                let field = DRAFT_FIELDS.iter().copied().find(|name| {
                    if exact {
                        key.as_str() == *name
                    } else {
                        key.as_str() != *name && key.eq_ignore_ascii_case(name)
                    }
                });
                if let Some(field) = field {
                    matched.push((field, value));
                }
            }
        }

        let mut draft = Self::default();
        for (field, value) in matched {
            if value.is_null() {
                continue;
            }
            match field {
                "name" => draft.name = text_field(field, value)?,
                "manufacturer" => draft.manufacturer = text_field(field, value)?,
                "height" => draft.height = number_field(field, value)?,
                "width" => draft.width = number_field(field, value)?,
                _ => draft.length = number_field(field, value)?,
            }
        }
        Ok(draft)
    }
}

fn text_field(field: &str, value: &Value) -> DecodeResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(mistyped(field, "string", other)),
    }
}

fn number_field(field: &str, value: &Value) -> DecodeResult<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| mistyped(field, "number", value)),
        other => Err(mistyped(field, "number", other)),
    }
}

fn mistyped(field: &str, expected: &str, found: &Value) -> DecodeError {
    DecodeError::Malformed(format!(
        "field '{}' expects a {}, found {}",
        field,
        expected,
        super::json_kind(found)
    ))
}
