mod common;

use catalog::config::myconfig::ServiceConfig;
use common::{InMemoryStore, TestServer};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::atomic::Ordering;

fn widget() -> Value {
    json!({
        "name": "Widget",
        "sku": "W-1",
        "price": 9.99,
        "warehouse_id": 1,
        "initial_quantity": 50
    })
}

async fn post_product(srv: &TestServer, body: &Value) -> (StatusCode, Value) {
    let res = srv
        .client
        .post(srv.url("/api/products"))
        .json(body)
        .send()
        .await
        .unwrap();

    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn creates_product_and_inventory_together() {
    let store = InMemoryStore::new();
    let srv = TestServer::spawn(store.clone(), ServiceConfig::default()).await;

    let (status, body) = post_product(&srv, &widget()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Product created", "product_id": 1 }));

    let products = store.products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Widget");
    assert_eq!(products[0].sku, "W-1");
    assert_eq!(products[0].price, 9.99);
    assert_eq!(products[0].warehouse_id, 1);
    assert_eq!(products[0].low_stock_threshold, 10);

    let inventory = store.inventory();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].product_id, 1);
    assert_eq!(inventory[0].warehouse_id, 1);
    assert_eq!(inventory[0].quantity, 50);

    assert_eq!(store.commits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn optional_fields_are_stored_when_given() {
    let store = InMemoryStore::new();
    let srv = TestServer::spawn(store.clone(), ServiceConfig::default()).await;

    let mut body = widget();
    body["low_stock_threshold"] = json!(25);
    body["supplier_id"] = json!(7);
    body["description"] = json!("ignored");

    let (status, _) = post_product(&srv, &body).await;

    assert_eq!(status, StatusCode::CREATED);
    let products = store.products();
    assert_eq!(products[0].low_stock_threshold, 25);
    assert_eq!(products[0].supplier_id, Some(7));
}

#[tokio::test]
async fn empty_object_is_missing_fields() {
    let store = InMemoryStore::new();
    let srv = TestServer::spawn(store.clone(), ServiceConfig::default()).await;

    let (status, body) = post_product(&srv, &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing required fields" }));
    assert!(store.products().is_empty());
    assert!(store.inventory().is_empty());
}

#[tokio::test]
async fn each_missing_or_null_field_is_rejected() {
    let store = InMemoryStore::new();
    let srv = TestServer::spawn(store.clone(), ServiceConfig::default()).await;

    for field in ["name", "sku", "price", "warehouse_id", "initial_quantity"] {
        let mut missing = widget();
        missing.as_object_mut().unwrap().remove(field);
        let (status, body) = post_product(&srv, &missing).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field} missing");
        assert_eq!(body["error"], "Missing required fields", "{field} missing");

        let mut nulled = widget();
        nulled[field] = Value::Null;
        let (status, body) = post_product(&srv, &nulled).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field} null");
        assert_eq!(body["error"], "Missing required fields", "{field} null");
    }

    assert!(store.products().is_empty());
    assert_eq!(store.commits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_body_is_missing_fields() {
    let store = InMemoryStore::new();
    let srv = TestServer::spawn(store.clone(), ServiceConfig::default()).await;

    let res = srv
        .client
        .post(srv.url("/api/products"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let srv = TestServer::spawn(InMemoryStore::new(), ServiceConfig::default()).await;

    let res = srv
        .client
        .post(srv.url("/api/products"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn wrong_field_type_is_a_bad_request() {
    let store = InMemoryStore::new();
    let srv = TestServer::spawn(store.clone(), ServiceConfig::default()).await;

    let mut body = widget();
    body["initial_quantity"] = json!("fifty");

    let (status, body) = post_product(&srv, &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid field"));
    assert!(store.products().is_empty());
}

#[tokio::test]
async fn negative_values_fail_validation_before_any_write() {
    let store = InMemoryStore::new();
    let srv = TestServer::spawn(store.clone(), ServiceConfig::default()).await;

    let mut body = widget();
    body["initial_quantity"] = json!(-5);
    body["price"] = json!(-1.0);

    let (status, body) = post_product(&srv, &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("initial_quantity: Initial quantity cannot be negative"));
    assert!(error.contains("price: Price cannot be negative"));

    assert!(store.products().is_empty());
    assert_eq!(store.commits.load(Ordering::SeqCst), 0);
    assert_eq!(store.rollbacks.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn blank_sku_fails_validation() {
    let srv = TestServer::spawn(InMemoryStore::new(), ServiceConfig::default()).await;

    let mut body = widget();
    body["sku"] = json!("   ");

    let (status, body) = post_product(&srv, &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("sku: SKU is required"));
}

#[tokio::test]
async fn duplicate_sku_is_a_server_error_and_leaves_no_rows() {
    let store = InMemoryStore::new();
    let srv = TestServer::spawn(store.clone(), ServiceConfig::default()).await;

    let (status, _) = post_product(&srv, &widget()).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut again = widget();
    again["name"] = json!("Widget copy");
    again["initial_quantity"] = json!(5);
    let (status, body) = post_product(&srv, &again).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("products_sku_key"));

    assert_eq!(store.products().len(), 1);
    assert_eq!(store.inventory().len(), 1);
    assert_eq!(store.inventory()[0].quantity, 50);
    assert_eq!(store.rollbacks.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn inventory_failure_rolls_back_the_product() {
    let store = InMemoryStore::new();
    store.fail_inventory_insert.store(true, Ordering::SeqCst);
    let srv = TestServer::spawn(store.clone(), ServiceConfig::default()).await;

    let (status, body) = post_product(&srv, &widget()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("inventory insert failed"));
    assert!(store.products().is_empty());
    assert!(store.inventory().is_empty());
    assert_eq!(store.commits.load(Ordering::SeqCst), 0);
    assert_eq!(store.rollbacks.load(Ordering::SeqCst), 1);

    // The next request starts from a clean transaction.
    store.fail_inventory_insert.store(false, Ordering::SeqCst);
    let (status, body) = post_product(&srv, &widget()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(store.products().len(), 1);
    assert_eq!(body["product_id"], store.products()[0].id);
}

#[tokio::test]
async fn unknown_warehouse_is_rejected_when_verification_is_on() {
    let store = InMemoryStore::with_warehouses(&[1]);
    let config = ServiceConfig {
        verify_warehouse: true,
        ..ServiceConfig::default()
    };
    let srv = TestServer::spawn(store.clone(), config).await;

    let mut body = widget();
    body["warehouse_id"] = json!(999);
    let (status, body) = post_product(&srv, &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Warehouse 999 not found");
    assert!(store.products().is_empty());
    assert_eq!(store.rollbacks.load(Ordering::SeqCst), 1);

    let (status, _) = post_product(&srv, &widget()).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn warehouse_is_not_checked_by_default() {
    let store = InMemoryStore::new();
    let srv = TestServer::spawn(store.clone(), ServiceConfig::default()).await;

    let mut body = widget();
    body["warehouse_id"] = json!(999);
    let (status, _) = post_product(&srv, &body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(store.inventory()[0].warehouse_id, 999);
}

#[tokio::test]
async fn metrics_endpoint_reports_product_requests() {
    let srv = TestServer::spawn(InMemoryStore::new(), ServiceConfig::default()).await;

    let (status, _) = post_product(&srv, &widget()).await;
    assert_eq!(status, StatusCode::CREATED);

    let res = srv.client.get(srv.url("/metrics")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/openmetrics-text")
    );

    let text = res.text().await.unwrap();
    assert!(text.contains("product_command_service_request_counter_total"));
    assert!(text.contains("process_start_time_seconds"));
}

#[tokio::test]
async fn openapi_document_lists_both_routes() {
    let srv = TestServer::spawn(InMemoryStore::new(), ServiceConfig::default()).await;

    let res = srv
        .client
        .get(srv.url("/api-docs/openapi.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let doc: Value = res.json().await.unwrap();
    assert!(doc["paths"]["/api/products"]["post"].is_object());
    assert!(doc["paths"]["/api/companies/{company_id}/alerts/low-stock"]["get"].is_object());
}
