//! Integration tests for registration, login, and the access gate.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, test_config};

#[tokio::test]
async fn test_register_then_login_as_user() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "A@X.com", "password": "Secret1!" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["identity"]["role"], "user");
    assert_eq!(response.body["data"]["identity"]["email"], "a@x.com");
    assert!(response.body["data"]["identity"].get("passwordHash").is_none());

    let token = app.login("a@x.com", "Secret1!").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["role"], "user");
    assert_eq!(
        me.body["data"]["identityId"],
        response.body["data"]["identity"]["id"]
    );
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.register("dup@x.com", "Secret1!").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "DUP@x.com", "password": "Other22!" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_register_rejects_short_password_and_bad_email() {
    let app = TestApp::new();

    let short = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "s@x.com", "password": "abc" })),
            None,
        )
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let bad_email = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "not-an-email", "password": "Secret1!" })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_role_field() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "r@x.com", "password": "Secret1!", "role": "admin" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let app = TestApp::new();
    app.register("a@x.com", "Secret1!").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "a@x.com", "password": "Wrong99!" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@x.com", "password": "Secret1!" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.error_code(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_and_tampered_tokens_get_the_same_rejection() {
    let app = TestApp::new();
    let token = app.register("t@x.com", "Secret1!").await;

    let signature_start = token.rfind('.').expect("token has a signature") + 1;
    let mut tampered: Vec<char> = token.chars().collect();
    let target = signature_start + 5;
    tampered[target] = if tampered[target] == 'a' { 'b' } else { 'a' };
    let tampered: String = tampered.into_iter().collect();

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not.a.token"))
        .await;
    let forged = app
        .request("GET", "/api/auth/me", None, Some(&tampered))
        .await;

    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body, forged.body);
    assert_eq!(forged.body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_non_bearer_authorization_is_rejected() {
    let app = TestApp::new();

    let response = app
        .raw_request("GET", "/api/auth/me", None, Some("Basic YTpi"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_invalid_token_does_not_block_public_routes() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/products", None, Some("garbage"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_without_revocation_only_acknowledges() {
    let app = TestApp::new();
    let token = app.register("l@x.com", "Secret1!").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["revoked"], false);

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_with_revocation_invalidates_token() {
    let mut config = test_config();
    config.auth.revocation_enabled = true;
    let app = TestApp::with_config(config);
    let token = app.register("l@x.com", "Secret1!").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["revoked"], true);

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.body["message"], "Invalid or expired token");

    let fresh = app.login("l@x.com", "Secret1!").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&fresh)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new();
    let token = app.register("p@x.com", "Secret1!").await;

    let wrong_current = app
        .request(
            "PUT",
            "/api/auth/password",
            Some(json!({ "currentPassword": "nope!!", "newPassword": "Fresh22!" })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong_current.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "PUT",
            "/api/auth/password",
            Some(json!({ "currentPassword": "Secret1!", "newPassword": "Fresh22!" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "p@x.com", "password": "Secret1!" })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    app.login("p@x.com", "Fresh22!").await;
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/nowhere", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}
