//! HTTP API Tests
//!
//! Drives the axum router in-process and checks the status codes and
//! bodies of every furniture route.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use furnistore::http_server::{HttpServer, HttpServerConfig};
use furnistore::store::{FurnitureStore, PersistenceFailurePolicy};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

struct TestApp {
    _dir: TempDir,
    store: Arc<FurnitureStore>,
    router: Router,
}

fn app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(
        FurnitureStore::open(
            dir.path().join("furniture.json"),
            PersistenceFailurePolicy::Rollback,
        )
        .unwrap(),
    );
    let router = HttpServer::build_router(&HttpServerConfig::default(), store.clone());
    TestApp {
        _dir: dir,
        store,
        router,
    }
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let body = match body {
        Some(text) => Body::from(text.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

const CHAIR: &str =
    r#"{"name": "Chair", "manufacturer": "Thonet", "height": 84.5, "width": 42, "length": 52}"#;

// =============================================================================
// List & Create
// =============================================================================

#[tokio::test]
async fn test_list_empty() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/furniture", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn test_create_returns_201_with_id() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/furniture", Some(CHAIR)).await;

    assert_eq!(status, StatusCode::CREATED);
    let created = json_body(&body);
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Chair");
    assert_eq!(created["height"], 84.5);

    let (_, body) = send(&app, Method::GET, "/furniture", None).await;
    assert_eq!(json_body(&body), json!([created]));
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/furniture",
        Some(r#"{"id": 500, "name": "Bench"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json_body(&body)["id"], 1);
}

#[tokio::test]
async fn test_create_tolerates_null_and_key_case() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/furniture",
        Some(r#"{"Name": "Chair", "manufacturer": null, "HEIGHT": 3} trailing"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = json_body(&body);
    assert_eq!(created["name"], "Chair");
    assert_eq!(created["manufacturer"], "");
    assert_eq!(created["height"], 3.0);
}

#[tokio::test]
async fn test_create_malformed_is_400() {
    let app = app();
    for bad in ["", "{", "[]", r#"{"height": "tall"}"#, r#"{"name": 7}"#] {
        let (status, body) = send(&app, Method::POST, "/furniture", Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", bad);
        assert_eq!(json_body(&body)["code"], 400);
    }
    assert!(app.store.is_empty());
    assert_eq!(app.store.next_id(), 1);
}

// =============================================================================
// Get
// =============================================================================

#[tokio::test]
async fn test_get_by_id() {
    let app = app();
    send(&app, Method::POST, "/furniture", Some(CHAIR)).await;

    let (status, body) = send(&app, Method::GET, "/furniture/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["manufacturer"], "Thonet");
}

#[tokio::test]
async fn test_get_unknown_is_404() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/furniture/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"], "furniture 42 not found");
}

#[tokio::test]
async fn test_non_integer_id_is_400_on_every_route() {
    let app = app();
    for method in [Method::GET, Method::PUT, Method::PATCH, Method::DELETE] {
        let (status, _) = send(&app, method.clone(), "/furniture/abc", Some(CHAIR)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", method);
    }
}

// =============================================================================
// Replace
// =============================================================================

#[tokio::test]
async fn test_put_replaces_and_keeps_path_id() {
    let app = app();
    send(&app, Method::POST, "/furniture", Some(CHAIR)).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/furniture/1",
        Some(r#"{"id": 9, "name": "Armchair", "manufacturer": "Knoll", "height": 70, "width": 80, "length": 75}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let replaced = json_body(&body);
    assert_eq!(replaced["id"], 1);
    assert_eq!(replaced["name"], "Armchair");

    let (status, _) = send(&app, Method::GET, "/furniture/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_unknown_is_404_and_bad_body_is_400() {
    let app = app();
    let (status, _) = send(&app, Method::PUT, "/furniture/3", Some(CHAIR)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, Method::POST, "/furniture", Some(CHAIR)).await;
    let (status, _) = send(&app, Method::PUT, "/furniture/1", Some("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.get(1).unwrap().name, "Chair");
}

// =============================================================================
// Patch
// =============================================================================

#[tokio::test]
async fn test_patch_is_204_and_merges() {
    let app = app();
    send(&app, Method::POST, "/furniture", Some(CHAIR)).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/furniture/1",
        Some(r#"{"height": 10.5, "width": "wide", "legs": 4}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let record = app.store.get(1).unwrap();
    assert_eq!(record.height, 10.5);
    assert_eq!(record.width, 42.0);
    assert_eq!(record.name, "Chair");
}

#[tokio::test]
async fn test_patch_errors() {
    let app = app();
    let (status, _) = send(&app, Method::PATCH, "/furniture/1", Some(r#"{"name": "X"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::PATCH, "/furniture/77", Some("[1, 2]")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, Method::POST, "/furniture", Some(CHAIR)).await;
    let (status, _) = send(&app, Method::PATCH, "/furniture/1", Some("[1, 2]")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_is_204_then_404() {
    let app = app();
    for _ in 0..3 {
        send(&app, Method::POST, "/furniture", Some(CHAIR)).await;
    }

    let (status, body) = send(&app, Method::DELETE, "/furniture/2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (_, body) = send(&app, Method::GET, "/furniture", None).await;
    let ids: Vec<i64> = json_body(&body)
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);

    let (status, _) = send(&app, Method::DELETE, "/furniture/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Health, metrics, concurrency
// =============================================================================

#[tokio::test]
async fn test_health_and_metrics() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["status"], "ok");

    send(&app, Method::POST, "/furniture", Some(CHAIR)).await;
    send(&app, Method::GET, "/furniture/7", None).await;

    let (status, body) = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let metrics = json_body(&body);
    assert_eq!(metrics["records"], 1);
    assert_eq!(metrics["next_id"], 2);
    assert_eq!(metrics["creates"], 1);
    assert_eq!(metrics["not_found"], 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_posts_get_distinct_ids() {
    let app = Arc::new(app());
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..32 {
        let app = Arc::clone(&app);
        tasks.spawn(async move {
            let (status, body) = send(&app, Method::POST, "/furniture", Some(CHAIR)).await;
            assert_eq!(status, StatusCode::CREATED);
            json_body(&body)["id"].as_i64().unwrap()
        });
    }

    let mut ids = Vec::new();
    while let Some(id) = tasks.join_next().await {
        ids.push(id.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=32).collect::<Vec<i64>>());
}
