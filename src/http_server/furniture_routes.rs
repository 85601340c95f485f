//! Furniture HTTP Routes
//!
//! | Method | Path            | Success              |
//! |--------|-----------------|----------------------|
//! | GET    | /furniture      | 200, all records     |
//! | POST   | /furniture      | 201, created record  |
//! | GET    | /furniture/:id  | 200, record          |
//! | PUT    | /furniture/:id  | 200, replaced record |
//! | PATCH  | /furniture/:id  | 204                  |
//! | DELETE | /furniture/:id  | 204                  |
//!
//! Bodies are taken as raw bytes and decoded by the `furniture` module so
//! every decode failure is a 400 with a JSON error body. A PATCH body is
//! decoded only once its id is known to exist.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::furniture::{parse_id, Furniture, FurnitureDraft};
use crate::observability::{Event, Logger};
use crate::store::{FurnitureStore, StoreError};

/// Store handle shared by all handlers
pub type SharedStore = Arc<FurnitureStore>;

/// Create furniture routes
pub fn furniture_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/furniture", get(list_handler).post(create_handler))
        .route(
            "/furniture/:id",
            get(get_handler)
                .put(replace_handler)
                .patch(patch_handler)
                .delete(delete_handler),
        )
        .with_state(store)
}

/// Log client errors on the way out. Server errors are logged by the store.
fn rejected(err: impl Into<StoreError>) -> StoreError {
    let err = err.into();
    if err.is_client_error() {
        Logger::log(
            err.severity(),
            Event::RequestRejected.as_str(),
            &[
                ("reason", &err.to_string()),
                ("status", &err.status_code().as_u16().to_string()),
            ],
        );
    }
    err
}

async fn list_handler(State(store): State<SharedStore>) -> Json<Vec<Furniture>> {
    Json(store.list())
}

async fn create_handler(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<(StatusCode, Json<Furniture>), StoreError> {
    let draft = FurnitureDraft::from_json(&body).map_err(rejected)?;
    let created = store.create(draft).map_err(rejected)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_handler(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
) -> Result<Json<Furniture>, StoreError> {
    let id = parse_id(&raw_id).map_err(rejected)?;
    let record = store.get(id).map_err(rejected)?;
    Ok(Json(record))
}

async fn replace_handler(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Furniture>, StoreError> {
    let id = parse_id(&raw_id).map_err(rejected)?;
    let draft = FurnitureDraft::from_json(&body).map_err(rejected)?;
    let replaced = store.replace(id, draft).map_err(rejected)?;
    Ok(Json(replaced))
}

async fn patch_handler(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, StoreError> {
    let id = parse_id(&raw_id).map_err(rejected)?;
    store.merge_patch_json(id, &body).map_err(rejected)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_handler(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, StoreError> {
    let id = parse_id(&raw_id).map_err(rejected)?;
    store.delete(id).map_err(rejected)?;
    Ok(StatusCode::NO_CONTENT)
}
