//! Integration tests for the catalog routes and the admin role gate.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

fn mug() -> serde_json::Value {
    json!({
        "name": "Stoneware Mug",
        "description": "Reclaimed clay",
        "price": "12.00",
        "category": "cocina",
        "stock": 10
    })
}

#[tokio::test]
async fn test_user_token_on_admin_route_is_forbidden() {
    let app = TestApp::new();
    let token = app.register("a@x.com", "Secret1!").await;

    let response = app
        .request("POST", "/api/products", Some(mug()), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_route_without_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("DELETE", "/api/products/anything", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_manages_catalog() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let created = app
        .request("POST", "/api/products", Some(mug()), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["data"]["id"]
        .as_str()
        .expect("product id")
        .to_string();
    let path = format!("/api/products/{id}");

    let fetched = app.request("GET", &path, None, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["name"], "Stoneware Mug");
    assert_eq!(fetched.body["data"]["category"], "cocina");

    let updated = app
        .request("PUT", &path, Some(json!({ "price": "14.50" })), Some(&token))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["price"], "14.50");
    assert_eq!(updated.body["data"]["name"], "Stoneware Mug");

    let deleted = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.request("GET", &path, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_filters_by_category_and_price() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    for body in [
        mug(),
        json!({ "name": "Compost Bin", "price": "64.99", "category": "jardín" }),
        json!({ "name": "Bamboo Board", "price": "24.50", "category": "cocina" }),
    ] {
        let response = app
            .request("POST", "/api/products", Some(body), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let all = app.request("GET", "/api/products", None, None).await;
    assert_eq!(all.body["data"].as_array().map(Vec::len), Some(3));

    let kitchen = app
        .request("GET", "/api/products?category=cocina&maxPrice=20", None, None)
        .await;
    assert_eq!(kitchen.status, StatusCode::OK);
    let names: Vec<_> = kitchen.body["data"]
        .as_array()
        .expect("product list")
        .iter()
        .map(|p| p["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["Stoneware Mug".to_string()]);
}

#[tokio::test]
async fn test_listing_rejects_inverted_price_range() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/products?minPrice=50&maxPrice=10", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_cannot_create_negative_price() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/api/products",
            Some(json!({ "name": "Broken", "price": "-1", "category": "sala" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
