//! Observability HTTP Routes
//!
//! Health check and store counters.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::furniture_routes::SharedStore;
use crate::observability::MetricsSnapshot;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Store counters plus current collection size
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub records: usize,
    pub next_id: i64,
    #[serde(flatten)]
    pub counters: MetricsSnapshot,
}

/// Create observability routes
pub fn observability_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(store)
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn metrics_handler(State(store): State<SharedStore>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        records: store.len(),
        next_id: store.next_id(),
        counters: store.metrics(),
    })
}
