//! Concurrent furniture store
//!
//! Owns the collection and the identifier counter behind a single lock and
//! writes the full collection through to its snapshot after every
//! mutation. See [`FurnitureStore`] for the invariants it keeps.

mod errors;
mod furniture_store;
mod policy;

pub use errors::{ErrorResponse, StoreError, StoreResult};
pub use furniture_store::FurnitureStore;
pub use policy::PersistenceFailurePolicy;
