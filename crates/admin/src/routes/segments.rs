//! Customer segment handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::Value;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::SegmentRecord;
use crate::mutation::{MutationError, require_fields};
use crate::state::AppState;
use crate::view::ListView;

use super::resource::{self, ListParams, MutationResponse, RemoveParams, RemoveResponse};

const RESOURCE: &str = "segments";

fn validate_payload(payload: &Value) -> Result<(), MutationError> {
    let present = |field: &str| {
        payload
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|value| !value.trim().is_empty())
    };
    require_fields(&[
        ("name", present("name")),
        ("description", present("description")),
        ("criteria", present("criteria")),
    ])
}

/// Single segment detail.
#[instrument(skip(state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    resource::detail(state.backend(), RESOURCE, &id).await
}

/// Segment list view.
#[instrument(skip(state))]
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<ListView<SegmentRecord>> {
    resource::list_view(state.backend(), RESOURCE, &params).await
}

/// Create a segment. Name, description, and criteria are required.
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

/// Update a segment.
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

/// Delete a segment. Requires `?confirm=true`.
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
