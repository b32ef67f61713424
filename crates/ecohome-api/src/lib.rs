//! # ecohome-api
//!
//! HTTP API layer for the storefront built on Axum.
//!
//! Provides the REST endpoints, the access gate that attaches the caller's
//! identity to each request, role guards, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
