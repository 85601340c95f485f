//! Snapshot persistence errors
//!
//! Error codes:
//! - FURNISTORE_SNAPSHOT_CORRUPTED (FATAL) - file exists but is not a valid snapshot
//! - FURNISTORE_SNAPSHOT_READ_FAILED (FATAL) - file exists but cannot be read
//! - FURNISTORE_SNAPSHOT_WRITE_FAILED (ERROR) - snapshot could not be replaced

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::observability::Severity;

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Snapshot load/store failure
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Snapshot exists but cannot be decoded into a consistent collection
    #[error("snapshot {} is corrupted: {reason}", path.display())]
    Corrupted { path: PathBuf, reason: String },

    /// Snapshot exists but cannot be read
    #[error("failed to read snapshot {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Snapshot could not be written or committed
    #[error("failed to write snapshot {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistenceError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            PersistenceError::Corrupted { .. } => "FURNISTORE_SNAPSHOT_CORRUPTED",
            PersistenceError::ReadFailed { .. } => "FURNISTORE_SNAPSHOT_READ_FAILED",
            PersistenceError::WriteFailed { .. } => "FURNISTORE_SNAPSHOT_WRITE_FAILED",
        }
    }

    /// Load failures stop startup. A write failure is fatal or not
    /// depending on the store's failure policy, so it is reported as ERROR.
    pub fn severity(&self) -> Severity {
        match self {
            PersistenceError::Corrupted { .. } | PersistenceError::ReadFailed { .. } => {
                Severity::Fatal
            }
            PersistenceError::WriteFailed { .. } => Severity::Error,
        }
    }

    pub fn is_corruption(&self) -> bool {
        matches!(self, PersistenceError::Corrupted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_severity() {
        let corrupted = PersistenceError::Corrupted {
            path: PathBuf::from("furniture.json"),
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(corrupted.code(), "FURNISTORE_SNAPSHOT_CORRUPTED");
        assert_eq!(corrupted.severity(), Severity::Fatal);
        assert!(corrupted.is_corruption());

        let write = PersistenceError::WriteFailed {
            path: PathBuf::from("furniture.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(write.severity(), Severity::Error);
        assert!(!write.is_corruption());
    }

    #[test]
    fn test_display_names_path() {
        let err = PersistenceError::ReadFailed {
            path: PathBuf::from("/data/furniture.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/furniture.json"));
        assert!(msg.contains("denied"));
    }
}
