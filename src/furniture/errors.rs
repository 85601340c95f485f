//! Wire decoding errors

use thiserror::Error;

/// Result type for decoding request input
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A request body or path segment that could not be decoded.
///
/// Always a client error; no state is touched before decoding succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Body is not JSON, or a known field has the wrong JSON type
    #[error("malformed request body: {0}")]
    Malformed(String),

    /// Body is valid JSON but not the expected top-level shape
    #[error("expected a JSON {expected}, found {found}")]
    WrongShape {
        expected: &'static str,
        found: &'static str,
    },

    /// Path identifier is not a base-10 64-bit integer
    #[error("invalid furniture id: '{0}'")]
    InvalidId(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Malformed(err.to_string())
    }
}
