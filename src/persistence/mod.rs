//! Persistence adapter for the furniture store
//!
//! The whole collection lives in one JSON file. It is read once at startup
//! and rewritten in full after every mutation; there is no log and no
//! partial write.

mod errors;
mod snapshot_file;

pub use errors::{PersistenceError, PersistenceResult};
pub use snapshot_file::SnapshotFile;
