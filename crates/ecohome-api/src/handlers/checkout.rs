//! Checkout handler: streams the invoice PDF as an attachment.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use ecohome_service::CheckoutLine;

use crate::dto::request::CreateInvoiceRequest;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/orders/create-invoice
pub async fn create_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateInvoiceRequest>,
) -> ApiResult<Response> {
    let lines: Vec<CheckoutLine> = req.lines.into_iter().map(CheckoutLine::from).collect();
    let receipt = state.checkout_service.checkout(&auth, lines, req.total)?;

    let disposition = format!("attachment; filename=\"{}\"", receipt.filename);
    let chunks = receipt.document.map(Ok::<Bytes, Infallible>);
    let body = Body::from_stream(futures::stream::iter(chunks));

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, disposition),
            (CACHE_CONTROL, "no-store".to_string()),
        ],
        body,
    )
        .into_response())
}
