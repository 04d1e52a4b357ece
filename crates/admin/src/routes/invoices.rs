//! Invoice handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::Value;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::InvoiceRecord;
use crate::mutation::{MutationError, require_fields};
use crate::selection::BulkReport;
use crate::state::AppState;
use crate::view::ListView;

use super::resource::{
    self, BulkRequest, ListParams, MutationResponse, RemoveParams, RemoveResponse,
};

const RESOURCE: &str = "invoices";

/// Presence checks before submission; the backing API owns the rest
/// and its messages come back verbatim.
fn validate_payload(payload: &Value) -> Result<(), MutationError> {
    let has_customer = payload
        .get("customerId")
        .and_then(Value::as_str)
        .is_some_and(|id| !id.is_empty());
    require_fields(&[("customer", has_customer)])?;

    let has_line_items = payload
        .get("lineItems")
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty());
    if !has_line_items {
        return Err(MutationError::Validation(
            "at least one line item is required".to_string(),
        ));
    }
    Ok(())
}

/// Single invoice detail.
#[instrument(skip(state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::detail(state.backend(), RESOURCE, &id).await
}

/// Invoice list view. Supports search and status filters.
#[instrument(skip(state))]
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<ListView<InvoiceRecord>> {
    resource::list_view(state.backend(), RESOURCE, &params).await
}

/// Create an invoice. The payload must name a customer and carry at
/// least one line item.
#[instrument(skip(state, payload))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Json(payload): Json<Value>,
) -> Result<Json<MutationResponse>, AppError> {
    validate_payload(&payload)?;
    resource::create(state.backend(), RESOURCE, &params, &payload).await
}

/// Update an invoice.
#[instrument(skip(state, payload))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
    Json(payload): Json<Value>,
) -> Result<Json<MutationResponse>, AppError> {
    resource::update(state.backend(), RESOURCE, &id, &params, &payload).await
}

/// Delete an invoice. Requires `?confirm=true`.
#[instrument(skip(state))]
pub async fn remove(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
    Query(removal): Query<RemoveParams>,
) -> Result<Json<RemoveResponse>, AppError> {
    resource::remove(state.backend(), RESOURCE, &id, &params, &removal).await
}

/// Run a bulk action over the selected invoice ids.
#[instrument(skip(state, request), fields(count = request.ids.len()))]
pub async fn bulk(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<BulkRequest>,
) -> Json<BulkReport> {
    resource::bulk(state.backend(), RESOURCE, &request).await
}
