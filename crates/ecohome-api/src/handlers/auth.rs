//! Auth handlers: register, login, logout, me, password.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::dto::response::{
    ApiResponse, AuthResponse, LogoutResponse, MessageResponse, SessionResponse,
};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let session = state
        .auth_service
        .register(&req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AuthResponse::from(session))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthResponse>>> {
    let session = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(AuthResponse::from(session))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<LogoutResponse>>> {
    let revoked = state.auth_service.logout(&auth).await;
    let message = if revoked {
        "Logged out; the token has been revoked"
    } else {
        "Logged out; discard the token"
    };

    Ok(Json(ApiResponse::ok(LogoutResponse {
        revoked,
        message: message.to_string(),
    })))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> ApiResult<Json<ApiResponse<SessionResponse>>> {
    Ok(Json(ApiResponse::ok(SessionResponse::from(auth.context()))))
}

/// PUT /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .auth_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password changed".to_string(),
    })))
}
