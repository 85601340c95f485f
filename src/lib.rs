//! furnistore - furniture records over HTTP, persisted to a single JSON file
//!
//! Layers, leaves first:
//! - `furniture`: record types and wire decoding
//! - `persistence`: whole-file snapshot load/store
//! - `store`: the locked collection and its invariants
//! - `http_server`: axum transport over the store
//! - `cli`: configuration and process entry

pub mod cli;
pub mod furniture;
pub mod http_server;
pub mod observability;
pub mod persistence;
pub mod store;
