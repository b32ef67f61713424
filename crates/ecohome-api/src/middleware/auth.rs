//! The access gate.
//!
//! Runs on every request. A request without an `Authorization` header stays
//! unauthenticated and may still reach public routes. A request with one
//! either carries a valid bearer token, whose identity is attached for the
//! handlers, or is marked rejected so that protected routes answer 401.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use tracing::debug;

use ecohome_service::RequestContext;

use crate::state::AppState;

/// Outcome of the access gate, stored in request extensions.
#[derive(Debug, Clone)]
pub enum GateState {
    /// No credentials presented.
    Unauthenticated,
    /// A valid token; its identity and role.
    Valid(RequestContext),
    /// Credentials presented but malformed, forged, expired, or revoked.
    Rejected,
}

/// Validates the bearer token, if any, and attaches the outcome.
pub async fn access_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let gate = resolve(&state, &request);
    request.extensions_mut().insert(gate);
    next.run(request).await
}

fn resolve(state: &AppState, request: &Request) -> GateState {
    let headers = request.headers();
    if !headers.contains_key(AUTHORIZATION) {
        return GateState::Unauthenticated;
    }

    let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() else {
        debug!("Authorization header is not a bearer credential");
        return GateState::Rejected;
    };

    match state.token_issuer.validate(bearer.token()) {
        Ok(claims) => GateState::Valid(RequestContext::from_claims(&claims)),
        Err(_) => GateState::Rejected,
    }
}
