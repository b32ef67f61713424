//! Route definitions for the storefront HTTP API.
//!
//! All routes are mounted under `/api`. The access gate runs on every
//! request; protected handlers then demand an identity through the
//! `AuthUser` or `AdminUser` extractors.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use ecohome_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the per-request middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(order_routes())
        .merge(product_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::access_gate,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Register, login, logout, me, password
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/password", put(handlers::auth::change_password))
}

/// Checkout
fn order_routes() -> Router<AppState> {
    Router::new().route(
        "/orders/create-invoice",
        post(handlers::checkout::create_invoice),
    )
}

/// Catalog: public reads, admin writes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

async fn not_found() -> ApiError {
    AppError::not_found("Route not found").into()
}
