//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use ecohome_api::{AppState, build_app};
use ecohome_auth::PasswordHasher;
use ecohome_core::config::{AppConfig, CredentialBackend};
use ecohome_database::{MemoryCatalog, MemoryCredentialStore};

/// Test application context
pub struct TestApp {
    /// The Axum application for making test requests
    pub router: Router,
    /// Shared state, for setup that has no HTTP route (admin provisioning)
    pub state: AppState,
}

/// Configuration used by every test app unless overridden.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.backend = CredentialBackend::Memory;
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config
}

impl TestApp {
    /// Create a new test application with the default test configuration
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(
            config,
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(MemoryCatalog::new()),
            PasswordHasher::with_params(1024, 1, 1).expect("Failed to build hasher"),
        )
        .expect("Failed to build app state");

        Self {
            router: build_app(state.clone()),
            state,
        }
    }

    /// Register an identity through the API and return its token
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
        response.token()
    }

    /// Login and return the session token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.token()
    }

    /// Provision an admin out of band and return a token for it
    pub async fn admin_token(&self) -> String {
        self.state
            .auth_service
            .provision_admin("admin@ecohome.test", "AdminPass1")
            .await
            .expect("Failed to provision admin");
        self.login("admin@ecohome.test", "AdminPass1").await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let authorization = token.map(|t| format!("Bearer {t}"));
        self.raw_request(method, path, body, authorization.as_deref())
            .await
    }

    /// Make a request with an arbitrary `Authorization` header value
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Bytes,
    /// Parsed JSON body, `Null` for non-JSON responses
    pub body: Value,
}

impl TestResponse {
    /// The session token in an auth response
    pub fn token(&self) -> String {
        self.body["data"]["token"]
            .as_str()
            .expect("No token in response")
            .to_string()
    }

    /// The machine-readable error code
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    /// A response header as a string
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// Whether the raw body contains the given byte sequence
    pub fn body_contains(&self, needle: &[u8]) -> bool {
        self.bytes.windows(needle.len()).any(|w| w == needle)
    }
}
