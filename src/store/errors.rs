//! Store operation errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::furniture::DecodeError;
use crate::observability::Severity;
use crate::persistence::PersistenceError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a single store operation.
///
/// In every case the collection and the identifier counter are unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body or path identifier could not be decoded
    #[error("{0}")]
    InvalidInput(#[from] DecodeError),

    /// No record carries this identifier
    #[error("furniture {0} not found")]
    NotFound(i64),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Snapshot write failed and the mutation was rolled back
    #[error("{0}")]
    PersistenceFailure(#[source] PersistenceError),

    /// Counter reached `i64::MAX`; no further identifiers can be issued
    #[error("furniture identifiers exhausted")]
    IdentifiersExhausted,
}

impl StoreError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::IdentifiersExhausted => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            StoreError::InvalidInput(_) | StoreError::NotFound(_) => Severity::Warn,
            StoreError::PersistenceFailure(_) | StoreError::IdentifiersExhausted => {
                Severity::Error
            }
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&StoreError> for ErrorResponse {
    fn from(err: &StoreError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code().as_u16(),
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
