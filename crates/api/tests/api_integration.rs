//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Value};
use tower::ServiceExt;

use domain::{InMemoryProductCatalog, InMemoryStoreDirectory, Product, Store};

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    let stores = InMemoryStoreDirectory::new()
        .with_store(Store::new("S1", "Corner Grocer", "123 Main St"))
        .with_store(Store::new("S2", "Hardware Plus", "9 Elm Ave"));
    let products = InMemoryProductCatalog::new()
        .with_product(Product::new("P1", "Milk"))
        .with_product(Product::new("P2", "Hammer"));
    let state = api::create_default_state(stores, products);
    api::create_app(state, get_metrics_handle())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn create_body() -> Value {
    json!({
        "order_id": "O1",
        "items": [
            { "product_id": "P1", "store_id": "S1", "quantity": 2 },
            { "product_id": "P1", "store_id": "S1", "quantity": 3 },
            { "product_id": "P2", "store_id": "S2", "quantity": 1 },
        ]
    })
}

async fn create_list(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(post_json("/shopping-lists", create_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check() {
    let app = setup();
    let response = app.oneshot(get_req("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    let app = setup();
    let response = app.oneshot(get_req("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_then_get_groups_items_into_stops() {
    let app = setup();
    let id = create_list(&app).await;

    let response = app
        .oneshot(get_req(&format!("/shopping-lists/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["order_id"], "O1");
    assert_eq!(body["status"], "Created");
    let stops = body["stops"].as_array().unwrap();
    assert_eq!(stops.len(), 2);

    // duplicate (S1, P1) lines merged by summing quantities
    let s1 = stops.iter().find(|s| s["store_id"] == "S1").unwrap();
    let items = s1["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 5);
}

#[tokio::test]
async fn create_with_unknown_store_is_rejected() {
    let app = setup();
    let body = json!({
        "order_id": "O1",
        "items": [{ "product_id": "P1", "store_id": "nowhere", "quantity": 1 }]
    });
    let response = app.oneshot(post_json("/shopping-lists", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_no_items_is_a_bad_request() {
    let app = setup();
    let body = json!({ "order_id": "O1", "items": [] });
    let response = app.oneshot(post_json("/shopping-lists", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn assign_then_complete_happy_path() {
    let app = setup();
    let id = create_list(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/shopping-lists/{id}/assign"),
            json!({ "bot_id": "bot-7" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "Assigned");
    assert_eq!(body["assigned_bot_id"], "bot-7");

    let response = app
        .oneshot(post_json(
            &format!("/shopping-lists/{id}/complete"),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "Completed");
}

#[tokio::test]
async fn complete_before_assign_conflicts() {
    let app = setup();
    let id = create_list(&app).await;

    let response = app
        .oneshot(post_json(
            &format!("/shopping-lists/{id}/complete"),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn cancel_after_assign_succeeds() {
    let app = setup();
    let id = create_list(&app).await;

    app.clone()
        .oneshot(post_json(
            &format!("/shopping-lists/{id}/assign"),
            json!({ "bot_id": "bot-7" }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(&format!("/shopping-lists/{id}/cancel"), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "Canceled");
}

#[tokio::test]
async fn unknown_list_is_not_found() {
    let app = setup();
    let id = uuid::Uuid::new_v4();
    let response = app
        .oneshot(get_req(&format!("/shopping-lists/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_a_bad_request() {
    let app = setup();
    let response = app
        .oneshot(get_req("/shopping-lists/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
