//! Catalog handlers. Reads are public; writes need the admin role.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use ecohome_core::error::AppError;
use ecohome_entity::cart::ProductId;
use ecohome_entity::product::Product;

use crate::dto::request::{CreateProductRequest, ProductQuery, UpdateProductRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Vec<Product>>>> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;
    let products = state.catalog_service.list(&query.into()).await?;
    Ok(Json(ApiResponse::ok(products)))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Product>>> {
    let product = state.catalog_service.get(&ProductId::new(id)).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let product = state.catalog_service.create(&admin, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(product))))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> ApiResult<Json<ApiResponse<Product>>> {
    let product = state
        .catalog_service
        .update(&admin, &ProductId::new(id), req.into())
        .await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .catalog_service
        .delete(&admin, &ProductId::new(id))
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Product deleted".to_string(),
    })))
}
