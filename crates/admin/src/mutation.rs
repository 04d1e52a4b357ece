//! Mutation coordination: create/update/delete with post-mutation
//! refetch.
//!
//! Each mutation runs `Idle -> Submitting -> {Succeeded, Failed} ->
//! Idle`. Failures are terminal per attempt; there is no retrying
//! state, the operator re-invokes manually. After any successful
//! mutation the coordinator refetches the current list query so the
//! view reflects the write; the refetch is best-effort (the UI accepts
//! read-after-write staleness).

use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use crate::backend::{BackendError, ListPage, ResourceApi};
use crate::query::ListQuery;

/// Operator-facing mutation failure.
#[derive(Debug, Clone, Error)]
pub enum MutationError {
    /// Server rejected the payload; shown verbatim, no field mapping.
    #[error("{0}")]
    Validation(String),

    /// Anything else: transport failure, server error. Operators get a
    /// generic message; the detail goes to the log.
    #[error("operation failed")]
    Failed(String),
}

impl From<BackendError> for MutationError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::Validation(message) => Self::Validation(message),
            BackendError::Request(detail) => Self::Failed(detail),
        }
    }
}

/// Where the coordinator currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationPhase {
    #[default]
    Idle,
    Submitting,
}

/// Whether a destructive action was confirmed by the operator.
///
/// Confirmation is synchronous and happens before the coordinator is
/// invoked; a declined confirmation is a silent no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    /// Build from a request's `confirm` flag.
    #[must_use]
    pub const fn from_flag(confirmed: bool) -> Self {
        if confirmed { Self::Confirmed } else { Self::Declined }
    }
}

/// A successful create/update, with the refreshed list when the
/// refetch succeeded.
#[derive(Debug, Clone)]
pub struct Mutated {
    /// The record as the server returned it.
    pub record: Value,
    /// The refetched page for the coordinator's list query, if the
    /// refetch succeeded.
    pub refreshed: Option<ListPage>,
}

/// Outcome of a delete request.
#[derive(Debug, Clone)]
pub enum RemoveOutcome {
    /// The record was deleted; carries the refetched page if available.
    Removed(Option<ListPage>),
    /// The operator declined the confirmation prompt.
    Aborted,
}

/// Coordinates mutations against one resource and keeps the active
/// list query fresh afterwards.
#[derive(Debug)]
pub struct MutationCoordinator<'a, R: ResourceApi + ?Sized> {
    backend: &'a R,
    resource: &'a str,
    query: ListQuery,
    phase: MutationPhase,
}

impl<'a, R: ResourceApi + ?Sized> MutationCoordinator<'a, R> {
    /// Create a coordinator for `resource`, refreshing `query` after
    /// each successful mutation.
    #[must_use]
    pub const fn new(backend: &'a R, resource: &'a str, query: ListQuery) -> Self {
        Self {
            backend,
            resource,
            query,
            phase: MutationPhase::Idle,
        }
    }

    /// Current phase; `Idle` between attempts regardless of outcome.
    #[must_use]
    pub const fn phase(&self) -> MutationPhase {
        self.phase
    }

    /// Create a record, then refetch the list.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Validation`] for server-side payload
    /// rejections and [`MutationError::Failed`] for everything else.
    #[instrument(skip(self, payload), fields(resource = self.resource))]
    pub async fn create(&mut self, payload: &Value) -> Result<Mutated, MutationError> {
        self.phase = MutationPhase::Submitting;
        let result = self.backend.create(self.resource, payload).await;
        self.phase = MutationPhase::Idle;

        let record = result?;
        let refreshed = self.refetch().await;
        Ok(Mutated { record, refreshed })
    }

    /// Update a record, then refetch the list.
    ///
    /// # Errors
    ///
    /// Same error contract as [`Self::create`].
    #[instrument(skip(self, payload), fields(resource = self.resource))]
    pub async fn update(&mut self, id: &str, payload: &Value) -> Result<Mutated, MutationError> {
        self.phase = MutationPhase::Submitting;
        let result = self.backend.update(self.resource, id, payload).await;
        self.phase = MutationPhase::Idle;

        let record = result?;
        let refreshed = self.refetch().await;
        Ok(Mutated { record, refreshed })
    }

    /// Delete a record, gated on operator confirmation, then refetch.
    ///
    /// A declined confirmation returns [`RemoveOutcome::Aborted`]
    /// without touching the backend. There is no undo.
    ///
    /// # Errors
    ///
    /// Same error contract as [`Self::create`].
    #[instrument(skip(self), fields(resource = self.resource))]
    pub async fn remove(
        &mut self,
        id: &str,
        confirmation: Confirmation,
    ) -> Result<RemoveOutcome, MutationError> {
        if confirmation == Confirmation::Declined {
            return Ok(RemoveOutcome::Aborted);
        }

        self.phase = MutationPhase::Submitting;
        let result = self.backend.delete(self.resource, id).await;
        self.phase = MutationPhase::Idle;

        result?;
        Ok(RemoveOutcome::Removed(self.refetch().await))
    }

    /// Best-effort refetch of the active list query.
    async fn refetch(&self) -> Option<ListPage> {
        match self.backend.list(self.resource, &self.query).await {
            Ok(page) => Some(page),
            Err(error) => {
                tracing::warn!(%error, resource = self.resource, "post-mutation refetch failed");
                None
            }
        }
    }
}

/// Required-field presence check used by the create paths.
///
/// Validation is deliberately minimal: presence only, no format rules;
/// the backend owns real validation and its messages are surfaced
/// verbatim.
///
/// # Errors
///
/// Returns [`MutationError::Validation`] naming the first missing field.
pub fn require_fields(fields: &[(&str, bool)]) -> Result<(), MutationError> {
    for (name, present) in fields {
        if !present {
            return Err(MutationError::Validation(format!("{name} is required")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::ScriptedBackend;

    fn query() -> ListQuery {
        ListQuery::new(1, 25)
    }

    #[tokio::test]
    async fn create_refetches_and_new_record_is_present() {
        let backend = ScriptedBackend::new();
        let mut coordinator = MutationCoordinator::new(&backend, "products", query());

        let mutated = coordinator
            .create(&serde_json::json!({"title": "Widget", "status": "DRAFT"}))
            .await
            .expect("create");

        let refreshed = mutated.refreshed.expect("refetch");
        let created_id = mutated.record.get("id").and_then(Value::as_str).expect("id");
        assert!(
            refreshed
                .items
                .iter()
                .any(|item| item.get("id").and_then(Value::as_str) == Some(created_id)),
            "created record missing from refetched list"
        );
        assert_eq!(coordinator.phase(), MutationPhase::Idle);
    }

    #[tokio::test]
    async fn update_is_reflected_in_refetched_list() {
        let backend = ScriptedBackend::new();
        backend.seed("products", serde_json::json!({"id": "p1", "title": "Old"}));
        let mut coordinator = MutationCoordinator::new(&backend, "products", query());

        let mutated = coordinator
            .update("p1", &serde_json::json!({"title": "New"}))
            .await
            .expect("update");

        let refreshed = mutated.refreshed.expect("refetch");
        let titles: Vec<&str> = refreshed
            .items
            .iter()
            .filter_map(|item| item.get("title").and_then(Value::as_str))
            .collect();
        assert_eq!(titles, vec!["New"]);
    }

    #[tokio::test]
    async fn remove_deletes_and_refetched_list_omits_the_id() {
        let backend = ScriptedBackend::new();
        backend.seed("products", serde_json::json!({"id": "p1"}));
        backend.seed("products", serde_json::json!({"id": "p2"}));
        let mut coordinator = MutationCoordinator::new(&backend, "products", query());

        let outcome = coordinator
            .remove("p1", Confirmation::Confirmed)
            .await
            .expect("remove");

        match outcome {
            RemoveOutcome::Removed(Some(page)) => {
                assert!(
                    page.items
                        .iter()
                        .all(|item| item.get("id").and_then(Value::as_str) != Some("p1"))
                );
                assert_eq!(page.items.len(), 1);
            }
            other => panic!("expected Removed with refetch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn declined_confirmation_is_a_silent_noop() {
        let backend = ScriptedBackend::new();
        backend.seed("products", serde_json::json!({"id": "p1"}));
        let mut coordinator = MutationCoordinator::new(&backend, "products", query());

        let outcome = coordinator
            .remove("p1", Confirmation::Declined)
            .await
            .expect("remove");

        assert!(matches!(outcome, RemoveOutcome::Aborted));
        assert_eq!(backend.calls("products"), 0);
    }

    #[tokio::test]
    async fn validation_rejection_is_surfaced_verbatim() {
        let backend = ScriptedBackend::new();
        backend.fail_next("products", BackendError::Validation("name is taken".into()));
        let mut coordinator = MutationCoordinator::new(&backend, "products", query());

        let error = coordinator
            .create(&serde_json::json!({"title": "Dup"}))
            .await
            .expect_err("should fail");

        assert_eq!(error.to_string(), "name is taken");
        assert_eq!(coordinator.phase(), MutationPhase::Idle);
    }

    #[tokio::test]
    async fn transport_failure_is_generic_to_the_operator() {
        let backend = ScriptedBackend::new();
        backend.fail_next("products", BackendError::Request("connection reset".into()));
        let mut coordinator = MutationCoordinator::new(&backend, "products", query());

        let error = coordinator
            .create(&serde_json::json!({"title": "X"}))
            .await
            .expect_err("should fail");

        assert_eq!(error.to_string(), "operation failed");
    }

    #[test]
    fn require_fields_names_the_first_missing_field() {
        let result = require_fields(&[("name", true), ("criteria", false), ("description", false)]);
        match result {
            Err(MutationError::Validation(message)) => {
                assert_eq!(message, "criteria is required");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(require_fields(&[("name", true)]).is_ok());
    }
}
