//! Invoice handlers
//!
//! Request bodies carry the invoice content only. Numbers are allocated on
//! creation and totals are recomputed on every write.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};

use core_kernel::InvoiceId;
use domain_invoicing::{Invoice, InvoiceDraft};

use crate::auth::Claims;
use crate::dto::invoice::{ComputeResponse, NextNumberResponse, PreviewQuery};
use crate::{error::ApiError, AppState};

pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<Invoice>>, ApiError> {
    Ok(Json(state.invoices.list().await?))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<InvoiceId>,
) -> Result<Json<Invoice>, ApiError> {
    Ok(Json(state.invoices.get(id).await?))
}

/// Next number of the current year, as shown on a new invoice form
pub async fn next_number(
    State(state): State<AppState>,
) -> Result<Json<NextNumberResponse>, ApiError> {
    let numero = state.invoices.next_number().await?;
    Ok(Json(NextNumberResponse { numero }))
}

/// Saves a new invoice under the next number of its year
pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(draft): Json<InvoiceDraft>,
) -> Result<(StatusCode, Json<Invoice>), ApiError> {
    let invoice = state.invoices.issue(draft, claims.metadata()).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<InvoiceId>,
    Json(draft): Json<InvoiceDraft>,
) -> Result<Json<Invoice>, ApiError> {
    Ok(Json(state.invoices.update(id, draft, claims.metadata()).await?))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<InvoiceId>,
) -> Result<StatusCode, ApiError> {
    state.invoices.delete(id, claims.metadata()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Computes a draft without saving it
pub async fn compute_invoice(
    State(state): State<AppState>,
    Json(draft): Json<InvoiceDraft>,
) -> Result<Json<ComputeResponse>, ApiError> {
    Ok(Json(state.invoices.compute(draft)?))
}

/// Printable preview, as JSON or with `?format=text` as plain text
pub async fn preview_invoice(
    State(state): State<AppState>,
    Path(id): Path<InvoiceId>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, ApiError> {
    let preview = state.invoices.preview(id).await?;
    if query.wants_text() {
        Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            preview.to_string(),
        )
            .into_response())
    } else {
        Ok(Json(preview).into_response())
    }
}
