//! Shared plumbing for resource list/mutation handlers.
//!
//! Products, invoices, and segments all follow the same shape: a list
//! view built from query params, and create/update/delete routed
//! through the mutation coordinator. The per-resource modules stay
//! thin wrappers over these helpers.

use axum::Json;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::backend::{ListPage, ResourceApi};
use crate::error::AppError;
use crate::mutation::{Confirmation, MutationCoordinator, RemoveOutcome};
use crate::query::{DEFAULT_PAGE_SIZE, FilterState, ListQuery};
use crate::selection::{BulkAction, BulkReport, SelectionSet, run_bulk};
use crate::view::ListView;

/// Query params accepted by every list view.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    /// Fold the raw params into the canonical query.
    #[must_use]
    pub fn to_query(&self) -> ListQuery {
        let mut state = FilterState::new();
        if let Some(limit) = self.limit {
            state.set_page_size(limit.clamp(1, 100));
        } else {
            state.set_page_size(DEFAULT_PAGE_SIZE);
        }
        if let Some(search) = &self.search {
            state.set_search(search);
        }
        if let Some(status) = &self.status {
            state.set_filter("status", status);
        }
        if let Some(category) = &self.category {
            state.set_filter("category", category);
        }
        // Page last: filter setters reset pagination
        state.set_page(self.page.unwrap_or(1));
        state.to_query()
    }
}

/// Query params for delete routes.
#[derive(Debug, Default, Deserialize)]
pub struct RemoveParams {
    /// The operator confirmed the destructive action.
    #[serde(default)]
    pub confirm: bool,
}

/// Body of a bulk action request.
#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub action: BulkAction,
    pub ids: Vec<String>,
    /// Required for destructive actions.
    #[serde(default)]
    pub confirm: bool,
}

/// Response body for a successful create/update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    /// The record as the backing API returned it.
    pub record: Value,
    /// The refetched page for the active query, when available.
    pub refreshed: Option<ListPage>,
}

/// Response body for a delete request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum RemoveResponse {
    Deleted { refreshed: Option<ListPage> },
    Aborted,
}

/// Fetch one page of `resource` and fold it into a view state.
///
/// Fetch failures surface as [`ListView::Error`], not as an HTTP error;
/// the view owns its own error presentation.
pub async fn list_view<T, R>(backend: &R, resource: &str, params: &ListParams) -> Json<ListView<T>>
where
    T: DeserializeOwned + Serialize,
    R: ResourceApi + ?Sized,
{
    let query = params.to_query();
    let result = backend.list(resource, &query).await;
    Json(ListView::from_fetch(result))
}

/// Fetch one record of `resource` by id.
pub async fn detail<R: ResourceApi + ?Sized>(
    backend: &R,
    resource: &str,
    id: &str,
) -> Result<Json<Value>, AppError> {
    Ok(Json(backend.get(resource, id).await?))
}

/// Create a record and refetch the active list query.
pub async fn create<R: ResourceApi + ?Sized>(
    backend: &R,
    resource: &str,
    params: &ListParams,
    payload: &Value,
) -> Result<Json<MutationResponse>, AppError> {
    let mut coordinator = MutationCoordinator::new(backend, resource, params.to_query());
    let mutated = coordinator.create(payload).await?;
    Ok(Json(MutationResponse {
        record: mutated.record,
        refreshed: mutated.refreshed,
    }))
}

/// Update a record and refetch the active list query.
pub async fn update<R: ResourceApi + ?Sized>(
    backend: &R,
    resource: &str,
    id: &str,
    params: &ListParams,
    payload: &Value,
) -> Result<Json<MutationResponse>, AppError> {
    let mut coordinator = MutationCoordinator::new(backend, resource, params.to_query());
    let mutated = coordinator.update(id, payload).await?;
    Ok(Json(MutationResponse {
        record: mutated.record,
        refreshed: mutated.refreshed,
    }))
}

/// Delete a record, gated on the `confirm` query param.
///
/// The refetch runs against the caller's list params, so the refreshed
/// page matches the view the operator deleted from.
pub async fn remove<R: ResourceApi + ?Sized>(
    backend: &R,
    resource: &str,
    id: &str,
    params: &ListParams,
    removal: &RemoveParams,
) -> Result<Json<RemoveResponse>, AppError> {
    let mut coordinator = MutationCoordinator::new(backend, resource, params.to_query());
    let outcome = coordinator
        .remove(id, Confirmation::from_flag(removal.confirm))
        .await?;
    Ok(Json(match outcome {
        RemoveOutcome::Removed(refreshed) => RemoveResponse::Deleted { refreshed },
        RemoveOutcome::Aborted => RemoveResponse::Aborted,
    }))
}

/// Run a bulk action over the request's selected ids.
///
/// An unconfirmed destructive action is treated like a declined
/// confirmation prompt: nothing runs, the report is empty.
pub async fn bulk<R: ResourceApi + ?Sized>(
    backend: &R,
    resource: &str,
    request: &BulkRequest,
) -> Json<BulkReport> {
    if request.action.is_destructive() && !request.confirm {
        return Json(BulkReport::default());
    }

    let mut selection = SelectionSet::new();
    selection.select_all(request.ids.iter().cloned());
    let report = run_bulk(
        backend,
        resource,
        request.action,
        &mut selection,
        &ListQuery::new(1, DEFAULT_PAGE_SIZE),
    )
    .await;
    Json(report)
}
