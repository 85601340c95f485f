//! Whole-file JSON snapshot of the furniture collection
//!
//! Write protocol:
//! 1. Serialize the full collection to `<file>.tmp`
//! 2. fsync the temp file
//! 3. Rename temp over the snapshot
//! 4. fsync the parent directory (best effort)
//!
//! A reader therefore sees either the previous or the new snapshot, never a
//! partial one.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::errors::{PersistenceError, PersistenceResult};
use crate::furniture::Furniture;

/// Location of a snapshot on disk.
///
/// Holds no collection state: `load` hands back a fresh vector and `save`
/// only borrows the caller's slice.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    temp_path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);
        Self { path, temp_path }
    }

    /// Path of the committed snapshot
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path used while a new snapshot is being written
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Load the stored collection in file order.
    ///
    /// A missing file is an empty collection. A file that cannot be parsed
    /// as an array of records, or that repeats an identifier, is corrupted.
    pub fn load(&self) -> PersistenceResult<Vec<Furniture>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PersistenceError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records: Vec<Furniture> =
            serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Corrupted {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(PersistenceError::Corrupted {
                    path: self.path.clone(),
                    reason: format!("duplicate furniture id {}", record.id),
                });
            }
        }

        Ok(records)
    }

    /// Replace the snapshot with `records`.
    pub fn save(&self, records: &[Furniture]) -> PersistenceResult<()> {
        let content = encode(records).map_err(|source| self.write_failed(source))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.write_failed(e))?;
            }
        }

        if let Err(e) = self.write_temp(&content) {
            let _ = fs::remove_file(&self.temp_path);
            return Err(self.write_failed(e));
        }

        if let Err(e) = fs::rename(&self.temp_path, &self.path) {
            let _ = fs::remove_file(&self.temp_path);
            return Err(self.write_failed(e));
        }

        // Make the rename itself durable.
        if let Some(parent) = self.path.parent() {
            let dir = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            if let Ok(handle) = File::open(dir) {
                let _ = handle.sync_all();
            }
        }

        Ok(())
    }

    fn write_temp(&self, content: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.temp_path)?;
        file.write_all(content)?;
        file.sync_all()
    }

    fn write_failed(&self, source: io::Error) -> PersistenceError {
        PersistenceError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }
}

/// Pretty-printed with four-space indentation, trailing newline
fn encode(records: &[Furniture]) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(64 + records.len() * 128);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    records
        .serialize(&mut serializer)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    buffer.push(b'\n');
    Ok(buffer)
}
