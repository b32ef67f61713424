//! Integration tests for checkout and invoice delivery.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, test_config};

const INVOICE: &str = "/api/orders/create-invoice";

#[tokio::test]
async fn test_checkout_streams_pdf_attachment() {
    let app = TestApp::new();
    let token = app.register("buyer@x.com", "Secret1!").await;

    let response = app
        .request(
            "POST",
            INVOICE,
            Some(json!({
                "lines": [
                    { "productId": "p1", "name": "Mug", "unitPrice": "12.50", "quantity": 2 },
                    { "productId": "p1", "name": "Mug", "unitPrice": "12.50", "quantity": 1 }
                ],
                "total": "37.50"
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), "application/pdf");
    assert!(
        response
            .header("content-disposition")
            .starts_with("attachment; filename=\"invoice-")
    );
    assert!(response.header("content-disposition").ends_with(".pdf\""));
    assert_eq!(response.header("cache-control"), "no-store");

    assert!(response.bytes.starts_with(b"%PDF-"));
    assert!(response.bytes.ends_with(b"%%EOF\n"));
    assert!(response.body_contains(b"(Mug \\3273 \\227 $37.50) Tj"));
    assert!(response.body_contains(b"(Total: $37.50) Tj"));
    assert!(response.body_contains(b"(Page 1 of 1) Tj"));
}

#[tokio::test]
async fn test_checkout_accepts_legacy_field_names() {
    let app = TestApp::new();
    let token = app.register("legacy@x.com", "Secret1!").await;

    let response = app
        .request(
            "POST",
            INVOICE,
            Some(json!({
                "cartItems": [
                    { "_id": "p9", "name": "Towel", "price": 4.5, "qty": 2 },
                    { "_id": "p3", "name": "Soap", "price": 3 }
                ],
                "total": 12
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body_contains(b"(Total: $12.00) Tj"));
}

#[tokio::test]
async fn test_checkout_empty_cart_renders_zero_total() {
    let app = TestApp::new();
    let token = app.register("empty@x.com", "Secret1!").await;

    let response = app
        .request("POST", INVOICE, Some(json!({ "lines": [] })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body_contains(b"(Total: $0.00) Tj"));
    assert!(!response.body_contains(b"\\327"));
}

#[tokio::test]
async fn test_checkout_requires_authentication() {
    let app = TestApp::new();

    let response = app
        .request("POST", INVOICE, Some(json!({ "lines": [] })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Authentication required");
}

#[tokio::test]
async fn test_checkout_is_open_to_admins_too() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let response = app
        .request("POST", INVOICE, Some(json!({ "lines": [] })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_checkout_rejects_total_mismatch() {
    let app = TestApp::new();
    let token = app.register("mismatch@x.com", "Secret1!").await;

    let response = app
        .request(
            "POST",
            INVOICE,
            Some(json!({
                "lines": [{ "productId": "p1", "name": "Mug", "unitPrice": "10.00", "quantity": 3 }],
                "total": "1.00"
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_checkout_prints_client_total_when_match_not_enforced() {
    let mut config = test_config();
    config.checkout.enforce_total_match = false;
    let app = TestApp::with_config(config);
    let token = app.register("loose@x.com", "Secret1!").await;

    let response = app
        .request(
            "POST",
            INVOICE,
            Some(json!({
                "lines": [{ "productId": "p1", "name": "Mug", "unitPrice": "10.00", "quantity": 1 }],
                "total": "99.999"
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body_contains(b"(Total: $100.00) Tj"));
}

#[tokio::test]
async fn test_checkout_rejects_invalid_lines() {
    let app = TestApp::new();
    let token = app.register("invalid@x.com", "Secret1!").await;

    let zero_quantity = app
        .request(
            "POST",
            INVOICE,
            Some(json!({
                "lines": [{ "productId": "p1", "name": "Mug", "unitPrice": "1.00", "quantity": 0 }]
            })),
            Some(&token),
        )
        .await;
    assert_eq!(zero_quantity.status, StatusCode::BAD_REQUEST);

    let negative_price = app
        .request(
            "POST",
            INVOICE,
            Some(json!({
                "lines": [{ "productId": "p1", "name": "Mug", "unitPrice": "-1.00", "quantity": 1 }]
            })),
            Some(&token),
        )
        .await;
    assert_eq!(negative_price.status, StatusCode::BAD_REQUEST);

    let unknown_field = app
        .request(
            "POST",
            INVOICE,
            Some(json!({
                "lines": [{ "productId": "p1", "name": "Mug", "unitPrice": "1.00", "discount": 5 }]
            })),
            Some(&token),
        )
        .await;
    assert_eq!(unknown_field.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_enforces_line_limit() {
    let mut config = test_config();
    config.checkout.max_lines = 2;
    let app = TestApp::with_config(config);
    let token = app.register("bulk@x.com", "Secret1!").await;

    let lines: Vec<_> = (0..3)
        .map(|i| json!({ "productId": format!("p{i}"), "name": "Item", "unitPrice": "1.00" }))
        .collect();

    let response = app
        .request("POST", INVOICE, Some(json!({ "lines": lines })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_rejects_amounts_beyond_decimal_range() {
    let app = TestApp::new();
    let token = app.register("whale@x.com", "Secret1!").await;

    let response = app
        .request(
            "POST",
            INVOICE,
            Some(json!({
                "lines": [
                    { "productId": "p1", "name": "Big", "unitPrice": "79228162514264337593543950335", "quantity": 2 }
                ]
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let response = app
        .request(
            "POST",
            INVOICE,
            Some(json!({
                "lines": [
                    { "productId": "p1", "name": "Big", "unitPrice": "79228162514264337593543950335", "quantity": 1 },
                    { "productId": "p2", "name": "Soap", "unitPrice": "1", "quantity": 1 }
                ]
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_renders_largest_representable_amount() {
    let app = TestApp::new();
    let token = app.register("limit@x.com", "Secret1!").await;

    let response = app
        .request(
            "POST",
            INVOICE,
            Some(json!({
                "lines": [
                    { "productId": "p1", "name": "Big", "unitPrice": "79228162514264337593543950335", "quantity": 1 }
                ]
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body_contains(b"(Total: $79228162514264337593543950335.00) Tj"));
}
