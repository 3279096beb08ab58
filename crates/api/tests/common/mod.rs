#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use mediadex_db::models::catalog::{CatalogCollection, CatalogRecord};
use mediadex_db::repositories::CatalogRepo;
use mediadex_db::store::MemoryKvStore;
use serde_json::Value;
use tower::ServiceExt;

use mediadex_api::config::ServerConfig;
use mediadex_api::router::build_app_router;
use mediadex_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// A small scan page size makes multi-page propagation the normal case.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        scan_page_size: 2,
        database_url: None,
    }
}

/// Build the production router over the given store.
///
/// `MemoryKvStore` clones share their data, so a test can keep a handle
/// and inspect catalog records after each request.
pub fn build_test_app(store: MemoryKvStore) -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an item through the API and return its `data` object.
pub async fn create_item(store: &MemoryKvStore, item_type: &str, body: Value) -> Value {
    let app = build_test_app(store.clone());
    let response = post_json(app, &format!("/api/v1/master-data/{item_type}"), body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["data"].clone()
}

pub async fn seed(store: &MemoryKvStore, collection: CatalogCollection, id: &str, record: Value) {
    let Value::Object(map) = record else {
        panic!("catalog fixtures must be JSON objects");
    };
    CatalogRepo::save(store, collection, id, &map).await.unwrap();
}

pub async fn load(store: &MemoryKvStore, collection: CatalogCollection, id: &str) -> CatalogRecord {
    CatalogRepo::find(store, collection, id)
        .await
        .unwrap()
        .expect("catalog record should exist")
}
