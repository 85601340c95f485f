//! # furnistore HTTP Server Module
//!
//! Thin transport over [`crate::store::FurnitureStore`]: each route decodes
//! its input, calls one store operation, and maps the result to a status.
//!
//! # Endpoints
//!
//! - `/furniture`, `/furniture/:id` - CRUD and merge-patch
//! - `/health` - Health check
//! - `/metrics` - Store counters

pub mod config;
pub mod furniture_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use furniture_routes::{furniture_routes, SharedStore};
pub use server::HttpServer;
