//! The furniture store
//!
//! One mutex guards the collection and the identifier counter. Every
//! operation holds it for its full duration, including the snapshot write
//! of mutating operations, so operations are strictly serialized and a
//! reader never sees a half-applied mutation.
//!
//! # Invariants
//!
//! - Every issued identifier is below `next_id`; `next_id` never decreases
//! - Identifiers are never reused, even after delete
//! - Collection order is insertion order; delete closes the gap
//! - While the store serves, memory equals the last committed snapshot

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::errors::{StoreError, StoreResult};
use super::policy::PersistenceFailurePolicy;
use crate::furniture::{Furniture, FurnitureDraft, FurniturePatch};
use crate::observability::{log_event_with_fields, Event, Logger, MetricsSnapshot, StoreMetrics};
use crate::persistence::{PersistenceError, PersistenceResult, SnapshotFile};

/// State owned by the store lock
#[derive(Debug)]
struct Collection {
    records: Vec<Furniture>,
    next_id: i64,
}

impl Collection {
    fn from_snapshot(records: Vec<Furniture>) -> Option<Self> {
        let next_id = match records.iter().map(|r| r.id).max() {
            Some(max) => max.checked_add(1)?,
            None => 1,
        };
        Some(Self { records, next_id })
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

/// How to take back a mutation whose snapshot write failed
enum Undo {
    Append { previous_next_id: i64 },
    Overwrite { index: usize, previous: Furniture },
    Remove { index: usize, removed: Furniture },
}

impl Undo {
    fn revert(self, collection: &mut Collection) {
        match self {
            Undo::Append { previous_next_id } => {
                collection.records.pop();
                collection.next_id = previous_next_id;
            }
            Undo::Overwrite { index, previous } => {
                collection.records[index] = previous;
            }
            Undo::Remove { index, removed } => {
                collection.records.insert(index, removed);
            }
        }
    }
}

/// In-memory furniture collection with write-through snapshot persistence.
///
/// Construct once at startup and share behind an `Arc`.
pub struct FurnitureStore {
    snapshot: SnapshotFile,
    policy: PersistenceFailurePolicy,
    collection: Mutex<Collection>,
    metrics: StoreMetrics,
}

impl FurnitureStore {
    /// Load the snapshot at `path` and build the store.
    ///
    /// A missing file yields an empty store whose first identifier is 1.
    /// A file that exists but cannot be loaded is returned as an error and
    /// must stop startup.
    pub fn open(path: impl AsRef<Path>, policy: PersistenceFailurePolicy) -> PersistenceResult<Self> {
        let snapshot = SnapshotFile::new(path.as_ref());
        let records = snapshot.load()?;
        let collection =
            Collection::from_snapshot(records).ok_or_else(|| PersistenceError::Corrupted {
                path: snapshot.path().to_path_buf(),
                reason: format!("furniture id {} leaves no identifiers to issue", i64::MAX),
            })?;

        log_event_with_fields(
            Event::SnapshotLoaded,
            &[
                ("path", &snapshot.path().display().to_string()),
                ("records", &collection.records.len().to_string()),
                ("next_id", &collection.next_id.to_string()),
                ("policy", policy.as_str()),
            ],
        );

        Ok(Self {
            snapshot,
            policy,
            collection: Mutex::new(collection),
            metrics: StoreMetrics::new(),
        })
    }

    // Poisoning is ignored: no mutation path leaves the collection half-updated.
    fn lock(&self) -> MutexGuard<'_, Collection> {
        self.collection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All records in insertion order
    pub fn list(&self) -> Vec<Furniture> {
        let collection = self.lock();
        self.metrics.increment_reads();
        collection.records.clone()
    }

    /// The record with `id`
    pub fn get(&self, id: i64) -> StoreResult<Furniture> {
        let collection = self.lock();
        self.metrics.increment_reads();
        match collection.records.iter().find(|r| r.id == id) {
            Some(record) => Ok(record.clone()),
            None => Err(self.not_found(id)),
        }
    }

    /// Append a new record under the next identifier
    pub fn create(&self, draft: FurnitureDraft) -> StoreResult<Furniture> {
        let mut collection = self.lock();

        let id = collection.next_id;
        let next_id = id.checked_add(1).ok_or(StoreError::IdentifiersExhausted)?;
        let record = Furniture::from_draft(id, draft);

        collection.records.push(record.clone());
        collection.next_id = next_id;
        self.persist(&mut collection, Undo::Append { previous_next_id: id })?;

        self.metrics.increment_creates();
        Logger::info(Event::FurnitureCreated.as_str(), &[("id", &id.to_string())]);
        Ok(record)
    }

    /// Overwrite every field of the record with `id`; position and id are kept
    pub fn replace(&self, id: i64, draft: FurnitureDraft) -> StoreResult<Furniture> {
        let mut collection = self.lock();

        let index = collection.position(id).ok_or_else(|| self.not_found(id))?;
        let record = Furniture::from_draft(id, draft);
        let previous = std::mem::replace(&mut collection.records[index], record.clone());
        self.persist(&mut collection, Undo::Overwrite { index, previous })?;

        self.metrics.increment_replaces();
        Logger::info(Event::FurnitureReplaced.as_str(), &[("id", &id.to_string())]);
        Ok(record)
    }

    /// Overwrite only the fields present in `patch`.
    ///
    /// The snapshot is rewritten even when the patch is empty.
    pub fn merge_patch(&self, id: i64, patch: &FurniturePatch) -> StoreResult<()> {
        let mut collection = self.lock();
        let index = collection.position(id).ok_or_else(|| self.not_found(id))?;
        self.patch_at(&mut collection, index, patch)
    }

    /// Look up `id`, then decode `body` as a patch and merge it.
    ///
    /// An unknown id is `NotFound` whatever the body holds.
    pub fn merge_patch_json(&self, id: i64, body: &[u8]) -> StoreResult<()> {
        let mut collection = self.lock();
        let index = collection.position(id).ok_or_else(|| self.not_found(id))?;
        let patch = FurniturePatch::from_json(body)?;
        self.patch_at(&mut collection, index, &patch)
    }

    fn patch_at(
        &self,
        collection: &mut Collection,
        index: usize,
        patch: &FurniturePatch,
    ) -> StoreResult<()> {
        let previous = collection.records[index].clone();
        let id = previous.id;
        collection.records[index].apply_patch(patch);
        self.persist(collection, Undo::Overwrite { index, previous })?;

        self.metrics.increment_patches();
        Logger::info(
            Event::FurniturePatched.as_str(),
            &[
                ("id", &id.to_string()),
                ("fields", &patch.field_names().join(",")),
            ],
        );
        Ok(())
    }

    /// Remove the record with `id`, keeping the order of the rest
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let mut collection = self.lock();

        let index = collection.position(id).ok_or_else(|| self.not_found(id))?;
        let removed = collection.records.remove(index);
        self.persist(&mut collection, Undo::Remove { index, removed })?;

        self.metrics.increment_deletes();
        Logger::info(Event::FurnitureDeleted.as_str(), &[("id", &id.to_string())]);
        Ok(())
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifier the next create will receive
    pub fn next_id(&self) -> i64 {
        self.lock().next_id
    }

    /// Location of the backing snapshot
    pub fn path(&self) -> &Path {
        self.snapshot.path()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn not_found(&self, id: i64) -> StoreError {
        self.metrics.increment_not_found();
        StoreError::NotFound(id)
    }

    /// Write the collection through to disk, called with the lock held.
    fn persist(&self, collection: &mut Collection, undo: Undo) -> StoreResult<()> {
        let err = match self.snapshot.save(&collection.records) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };

        let path = self.snapshot.path().display().to_string();
        let reason = err.to_string();

        match self.policy {
            PersistenceFailurePolicy::Halt => {
                log_event_with_fields(
                    Event::SnapshotWriteFatal,
                    &[("code", err.code()), ("path", &path), ("reason", &reason)],
                );
                std::process::exit(1);
            }
            PersistenceFailurePolicy::Rollback => {
                undo.revert(collection);
                self.metrics.increment_persistence_failures();
                Logger::log(
                    err.severity(),
                    Event::SnapshotWriteFailed.as_str(),
                    &[("code", err.code()), ("path", &path), ("reason", &reason)],
                );
                Err(StoreError::PersistenceFailure(err))
            }
        }
    }
}
