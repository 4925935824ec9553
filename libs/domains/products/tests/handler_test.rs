//! Handler tests for the resource routes
//!
//! Exercise the products router alone: request decoding, status codes and
//! error bodies. The store is the in-memory repository.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, category: &str, name: &str) -> Product {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "category": category, "name": name }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let app = app();

    let product = create(&app, "c1", "n1").await;

    assert_eq!(product.id, 1);
    assert_eq!(product.category, "c1");
    assert_eq!(product.name, "n1");
}

#[tokio::test]
async fn test_create_product_validates_input() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "category": "c1", "name": "   " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn test_create_product_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"category\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_JSON");
}

#[tokio::test]
async fn test_get_product_round_trip() {
    let app = app();
    let created = create(&app, "books", "novel").await;

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_product_not_found_returns_404() {
    let response = app().oneshot(empty_request("GET", "/404")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn test_get_product_bad_id_returns_400() {
    let response = app().oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_update_product_keeps_omitted_fields() {
    let app = app();
    let created = create(&app, "books", "novel").await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "name": "poem" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.category, "books");
    assert_eq!(updated.name, "poem");
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let response = app()
        .oneshot(json_request("PUT", "/77", json!({ "name": "x" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_then_get() {
    let app = app();
    let created = create(&app, "books", "novel").await;
    let uri = format!("/{}", created.id);

    let response = app.clone().oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_by_category_scenario() {
    let app = app();
    create(&app, "electronics", "phone").await;
    create(&app, "electronics", "tablet").await;
    create(&app, "books", "novel").await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/?category=electronics&page=0&size=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: Value = json_body(response.into_body()).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    assert_eq!(page["totalElements"], 2);
    assert_eq!(page["totalPages"], 1);
    assert_eq!(page["pageNumber"], 0);

    let response = app
        .oneshot(empty_request("GET", "/categories"))
        .await
        .unwrap();
    let categories: Vec<String> = json_body(response.into_body()).await;
    assert_eq!(categories, ["books", "electronics"]);
}

#[tokio::test]
async fn test_list_uses_default_paging() {
    let response = app()
        .oneshot(empty_request("GET", "/?category=none"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: ProductPage = json_body(response.into_body()).await;
    assert!(page.items.is_empty());
    assert_eq!(page.total_elements, 0);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn test_list_accepts_highest_page_number() {
    let uri = format!(
        "/?category=c&page={}&size={}",
        domain_products::models::MAX_PAGE,
        domain_products::models::MAX_PAGE_SIZE
    );
    let response = app().oneshot(empty_request("GET", &uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: ProductPage = json_body(response.into_body()).await;
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_list_rejects_bad_paging() {
    for uri in [
        "/?category=c&size=0",
        "/?category=c&size=101",
        "/?category=c&page=-1",
        "/?category=c&page=9223372036854775807&size=100",
    ] {
        let response = app().oneshot(empty_request("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}
