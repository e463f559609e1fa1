//! Integration tests for the API server: every response leaves through the
//! envelope boundary, validation short-circuits before persistence, and
//! domain events reach the bus only after commit.

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain::InMemoryMessageBus;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Value};
use store::InMemoryDocumentStore;
use tower::ServiceExt;

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

fn setup_with_state(
    fulfillment_enabled: bool,
) -> (axum::Router, InMemoryDocumentStore, Arc<InMemoryMessageBus>) {
    let store = InMemoryDocumentStore::new();
    let (state, bus) =
        api::create_default_state(store.clone(), fulfillment_enabled).expect("wiring failed");
    let app = api::create_app(state, get_metrics_handle());
    (app, store, bus)
}

fn setup() -> axum::Router {
    setup_with_state(true).0
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn valid_product() -> Value {
    json!({
        "name": "Mechanical Keyboard",
        "category": ["peripherals"],
        "description": "Tenkeyless",
        "image_file": "keyboard.png",
        "price": 12900
    })
}

fn valid_order(customer_id: &str) -> Value {
    json!({
        "customer_id": customer_id,
        "order_name": "ORD-1001",
        "shipping_address": {
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email_address": "ada@example.com",
            "address_line": "12 Analytical Way",
            "country": "UK",
            "state": "London",
            "zip_code": "N1 9GU"
        },
        "billing_address": {},
        "items": [
            { "product_id": uuid::Uuid::new_v4().to_string(), "quantity": 2, "price": 12900 }
        ]
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_product_missing_name_is_rejected_before_persistence() {
    let (app, store, _bus) = setup_with_state(true);

    let mut product = valid_product();
    product["name"] = json!("");
    let response = app
        .oneshot(json_request("POST", "/products", product))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["isSuccess"], json!(false));
    assert_eq!(body["statusCode"], json!(400));
    assert_eq!(body["instance"], json!("/products"));
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["errorDetail"]["errorMessage"], json!("Name is required"));
    assert_eq!(body["errorDetail"]["errorCode"], json!("ProductName"));
    assert_eq!(body["errorDetail"]["errorType"], json!("CreateProduct"));

    assert_eq!(store.count("products").await, 0);
}

#[tokio::test]
async fn create_product_returns_a_created_envelope_with_the_new_id() {
    let (app, store, _bus) = setup_with_state(true);

    let response = app
        .oneshot(json_request("POST", "/products", valid_product()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["isSuccess"], json!(true));
    assert_eq!(body["statusCode"], json!(201));
    assert_eq!(body["errorDetail"], Value::Null);
    let id = body["data"]["id"].as_str().expect("id should be a string");
    assert!(!id.is_empty());

    assert_eq!(store.count("products").await, 1);
}

#[tokio::test]
async fn created_products_can_be_fetched_by_id() {
    let (app, _store, _bus) = setup_with_state(true);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/products", valid_product()))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/products/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["isSuccess"], json!(true));
    assert_eq!(body["data"]["name"], json!("Mechanical Keyboard"));
    assert_eq!(body["instance"], json!(format!("/products/{id}")));
}

#[tokio::test]
async fn missing_product_is_a_not_found_envelope() {
    let app = setup();
    let id = uuid::Uuid::new_v4();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/products/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["isSuccess"], json!(false));
    assert_eq!(body["statusCode"], json!(404));
    assert_eq!(body["errorDetail"]["errorCode"], json!("Unknown"));
}

#[tokio::test]
async fn update_product_rewrites_the_document() {
    let (app, _store, _bus) = setup_with_state(true);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/products", valid_product()))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let mut update = valid_product();
    update["id"] = json!(id);
    update["price"] = json!(9900);
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/products", update))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["updated"], json!(true));

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/products/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["price"], json!(9900));
}

#[tokio::test]
async fn create_order_publishes_exactly_one_message_after_commit() {
    let (app, store, bus) = setup_with_state(true);
    let customer = uuid::Uuid::new_v4();

    let response = app
        .oneshot(json_request(
            "POST",
            "/orders",
            valid_order(&customer.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["isSuccess"], json!(true));
    assert_eq!(body["statusCode"], json!(201));
    assert!(!body["data"]["id"].as_str().unwrap().is_empty());

    assert_eq!(store.count("orders").await, 1);
    let published = bus.published().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].event_type, "OrderCreated");
}

#[tokio::test]
async fn fulfillment_toggle_off_suppresses_outward_messages() {
    let (app, store, bus) = setup_with_state(false);
    let customer = uuid::Uuid::new_v4();

    let response = app
        .oneshot(json_request(
            "POST",
            "/orders",
            valid_order(&customer.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(store.count("orders").await, 1);
    assert_eq!(bus.count().await, 0);
}

#[tokio::test]
async fn create_order_missing_name_is_rejected_before_persistence() {
    let (app, store, bus) = setup_with_state(true);

    let mut order = valid_order(&uuid::Uuid::new_v4().to_string());
    order["order_name"] = json!("");
    let response = app
        .oneshot(json_request("POST", "/orders", order))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errorDetail"]["errorCode"], json!("ProductName"));
    assert_eq!(body["errorDetail"]["errorType"], json!("CreateOrder"));

    assert_eq!(store.count("orders").await, 0);
    assert_eq!(bus.count().await, 0);
}

#[tokio::test]
async fn deleting_a_missing_order_is_a_not_found_envelope() {
    let app = setup();
    let id = uuid::Uuid::new_v4();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/orders/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["isSuccess"], json!(false));
    assert_eq!(body["statusCode"], json!(404));
    assert_eq!(body["errorDetail"]["errorCode"], json!("Unknown"));
    assert_eq!(body["errorDetail"]["errorType"], json!("Unknown"));
}

#[tokio::test]
async fn orders_are_listed_per_customer() {
    let (app, _store, _bus) = setup_with_state(true);
    let customer = uuid::Uuid::new_v4();

    for _ in 0..2 {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/orders",
                valid_order(&customer.to_string()),
            ))
            .await
            .unwrap();
    }
    app.clone()
        .oneshot(json_request(
            "POST",
            "/orders",
            valid_order(&uuid::Uuid::new_v4().to_string()),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/orders/customer/{customer}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["isSuccess"], json!(true));
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn products_can_be_listed_by_category() {
    let (app, _store, _bus) = setup_with_state(true);

    app.clone()
        .oneshot(json_request("POST", "/products", valid_product()))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/products/category/PERIPHERALS")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
