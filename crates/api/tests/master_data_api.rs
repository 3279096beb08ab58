//! HTTP-level integration tests for the master data and sync endpoints.
//!
//! Requests go straight into the router through `tower::ServiceExt`; the
//! in-memory store stands in for Postgres.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_item, delete, get, load, post_json, put_json, seed};
use mediadex_db::models::catalog::CatalogCollection::{Primary, Secondary};
use mediadex_db::store::MemoryKvStore;
use serde_json::json;

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_item_in_data_envelope() {
    let store = MemoryKvStore::new();
    let app = build_test_app(store);

    let response = post_json(
        app,
        "/api/v1/master-data/actress",
        json!({"name": "  Sora Aoi ", "alias": "Sola, Aoi-chan", "website": "ignored"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Sora Aoi");
    assert_eq!(json["data"]["type"], "actress");
    assert_eq!(json["data"]["alias"], "Sola, Aoi-chan");
    assert!(json["data"]["id"].is_string());
    assert!(json["data"]["createdAt"].is_string());
    assert!(json["data"].get("website").is_none());
}

#[tokio::test]
async fn get_list_and_delete_round_trip() {
    let store = MemoryKvStore::new();
    let b = create_item(&store, "studio", json!({"name": "beta"})).await;
    create_item(&store, "studio", json!({"name": "Alpha"})).await;
    create_item(&store, "label", json!({"name": "Other partition"})).await;

    let response = get(build_test_app(store.clone()), "/api/v1/master-data/studio").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Alpha", "beta"]);

    let id = b["id"].as_str().unwrap();
    let uri = format!("/api/v1/master-data/studio/{id}");

    let response = get(build_test_app(store.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "beta");

    let response = delete(build_test_app(store.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], id);

    let response = get(build_test_app(store), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_item_returns_404() {
    let app = build_test_app(MemoryKvStore::new());

    let response = put_json(
        app,
        "/api/v1/master-data/tag/does-not-exist",
        json!({"name": "x"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unknown_type_returns_400() {
    let app = build_test_app(MemoryKvStore::new());

    let response = get(app, "/api/v1/master-data/planet").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn blank_name_is_a_validation_error() {
    let app = build_test_app(MemoryKvStore::new());

    let response = post_json(app, "/api/v1/master-data/tag", json!({"name": "   "})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn duplicate_name_returns_400_with_existing_id() {
    let store = MemoryKvStore::new();
    let first = create_item(&store, "actor", json!({"name": "Ken Shimizu"})).await;

    let response = post_json(
        build_test_app(store),
        "/api/v1/master-data/actor",
        json!({"name": "ken shimizu"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "DUPLICATE_NAME");
    assert_eq!(
        json["details"],
        format!("Conflicts with existing id {}", first["id"].as_str().unwrap())
    );
}

#[tokio::test]
async fn plain_update_does_not_touch_catalog() {
    let store = MemoryKvStore::new();
    let actress = create_item(&store, "actress", json!({"name": "Maria Ozawa"})).await;
    seed(&store, Primary, "M1", json!({"actress": "Maria Ozawa"})).await;

    let response = put_json(
        build_test_app(store.clone()),
        &format!("/api/v1/master-data/actress/{}", actress["id"].as_str().unwrap()),
        json!({"name": "Maria O."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Maria O.");
    assert!(json.get("sync").is_none());
    assert_eq!(load(&store, Primary, "M1").await["actress"], "Maria Ozawa");
}

// ---------------------------------------------------------------------------
// Sync
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sync_update_renames_across_both_collections() {
    let store = MemoryKvStore::new();
    let actress = create_item(&store, "actress", json!({"name": "Maria Ozawa"})).await;
    seed(&store, Primary, "M1", json!({"title": "Film", "actress": "Maria Ozawa, Sora Aoi"})).await;
    seed(&store, Primary, "M2", json!({"actress": "Sora Aoi"})).await;
    seed(&store, Primary, "M3", json!({"actress": "Maria Ozawa"})).await;
    seed(&store, Secondary, "S1", json!({"cast": "Maria Ozawa"})).await;

    let response = put_json(
        build_test_app(store.clone()),
        &format!("/api/v1/master-data/actress/{}/sync", actress["id"].as_str().unwrap()),
        json!({"name": "Maria O."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Maria O.");
    assert_eq!(json["sync"]["recordsUpdated"], 2);
    assert_eq!(json["sync"]["secondaryRecordsUpdated"], 1);

    let m1 = load(&store, Primary, "M1").await;
    assert_eq!(m1["actress"], "Maria O., Sora Aoi");
    assert_eq!(m1["title"], "Film");
    assert!(m1["updatedAt"].is_string());
    assert!(load(&store, Primary, "M2").await.get("updatedAt").is_none());
    assert_eq!(load(&store, Secondary, "S1").await["cast"], "Maria O.");
}

#[tokio::test]
async fn sync_update_of_non_propagating_type_reports_zero() {
    let store = MemoryKvStore::new();
    let studio = create_item(&store, "studio", json!({"name": "S1 No.1 Style"})).await;
    seed(&store, Primary, "M1", json!({"studio": "S1 No.1 Style"})).await;

    let response = put_json(
        build_test_app(store.clone()),
        &format!("/api/v1/master-data/studio/{}/sync", studio["id"].as_str().unwrap()),
        json!({"name": "S1"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["sync"], json!({"recordsUpdated": 0, "secondaryRecordsUpdated": 0}));
    assert_eq!(load(&store, Primary, "M1").await["studio"], "S1 No.1 Style");
}

#[tokio::test]
async fn sync_update_rejected_as_duplicate_leaves_catalog_alone() {
    let store = MemoryKvStore::new();
    let tag = create_item(&store, "tag", json!({"name": "Drama"})).await;
    create_item(&store, "tag", json!({"name": "Comedy"})).await;
    seed(&store, Primary, "M1", json!({"tags": "Drama, Action"})).await;

    let response = put_json(
        build_test_app(store.clone()),
        &format!("/api/v1/master-data/tag/{}/sync", tag["id"].as_str().unwrap()),
        json!({"name": "COMEDY"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_NAME");
    assert_eq!(load(&store, Primary, "M1").await["tags"], "Drama, Action");
}

#[tokio::test]
async fn manual_rename_endpoint_rewrites_catalog() {
    let store = MemoryKvStore::new();
    seed(&store, Primary, "M1", json!({"type": "Feature"})).await;
    seed(&store, Secondary, "S1", json!({"type": "Feature"})).await;
    seed(&store, Secondary, "S2", json!({"type": "Short"})).await;

    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/sync/rename",
        json!({"kind": "type", "oldName": "Feature", "newName": "Feature Film"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["recordsUpdated"], 1);
    assert_eq!(json["data"]["secondaryRecordsUpdated"], 1);
    assert_eq!(load(&store, Secondary, "S1").await["type"], "Feature Film");
    assert_eq!(load(&store, Secondary, "S2").await["type"], "Short");
}

#[tokio::test]
async fn manual_rename_rejects_unknown_kind_and_blank_names() {
    let store = MemoryKvStore::new();

    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/sync/rename",
        json!({"kind": "studio", "oldName": "A", "newName": "B"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        build_test_app(store),
        "/api/v1/sync/rename",
        json!({"kind": "actor", "oldName": " ", "newName": "B"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Malformed bodies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrongly_typed_create_body_returns_400_envelope() {
    let app = build_test_app(MemoryKvStore::new());

    let response = post_json(app, "/api/v1/master-data/actress", json!({"name": 5})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn wrongly_typed_sync_body_returns_400_and_keeps_item() {
    let store = MemoryKvStore::new();
    let actress = create_item(&store, "actress", json!({"name": "Maria Ozawa"})).await;
    let uri = format!("/api/v1/master-data/actress/{}", actress["id"].as_str().unwrap());

    let response = put_json(
        build_test_app(store.clone()),
        &format!("{uri}/sync"),
        json!({"name": ["x"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = get(build_test_app(store), &uri).await;
    assert_eq!(body_json(response).await["data"]["name"], "Maria Ozawa");
}

#[tokio::test]
async fn wrongly_typed_rename_body_returns_400() {
    let app = build_test_app(MemoryKvStore::new());

    let response = post_json(
        app,
        "/api/v1/sync/rename",
        json!({"kind": "actor", "oldName": 1, "newName": "B"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
