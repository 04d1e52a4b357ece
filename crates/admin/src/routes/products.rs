//! Product catalog handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::Value;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::ProductRecord;
use crate::selection::BulkReport;
use crate::state::AppState;
use crate::view::ListView;

use super::resource::{
    self, BulkRequest, ListParams, MutationResponse, RemoveParams, RemoveResponse,
};

const RESOURCE: &str = "products";

/// Product list view. Supports search, status, and category filters.
#[instrument(skip(state))]
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<ListView<ProductRecord>> {
    resource::list_view(state.backend(), RESOURCE, &params).await
}

/// Single product detail.
#[instrument(skip(state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::detail(state.backend(), RESOURCE, &id).await
}

/// Create a product. The backing API owns validation.
#[instrument(skip(state, payload))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Json(payload): Json<Value>,
) -> Result<Json<MutationResponse>, AppError> {
    resource::create(state.backend(), RESOURCE, &params, &payload).await
}

/// Update a product.
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

/// Delete a product. Requires `?confirm=true`.
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

/// Run a bulk action over the selected product ids.
#[instrument(skip(state, request), fields(count = request.ids.len()))]
pub async fn bulk(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<BulkRequest>,
) -> Json<BulkReport> {
    resource::bulk(state.backend(), RESOURCE, &request).await
}
