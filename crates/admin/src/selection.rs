//! Row selection and bulk actions for list views.
//!
//! A selection is a set of record ids owned by one mounted list view.
//! Bulk actions run sequentially over the selected ids; each id
//! succeeds or fails independently and the run never aborts early. The
//! selection is cleared once the run finishes, whatever the outcomes.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::backend::ResourceApi;
use crate::query::ListQuery;

/// Insertion-ordered set of selected record ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<String>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle one id in or out of the selection.
    pub fn toggle(&mut self, id: &str) {
        if let Some(position) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(position);
        } else {
            self.ids.push(id.to_owned());
        }
    }

    /// Replace the selection with the given ids (the current page),
    /// dropping duplicates while keeping first-seen order.
    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.clear();
        for id in ids {
            let id = id.into();
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A bulk action applicable to every selected record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Activate,
    Deactivate,
    Archive,
    Delete,
}

impl BulkAction {
    /// Update payload for this action, or `None` for deletion.
    #[must_use]
    pub fn payload(self) -> Option<Value> {
        match self {
            Self::Activate => Some(json!({"status": "ACTIVE"})),
            Self::Deactivate => Some(json!({"status": "DRAFT"})),
            Self::Archive => Some(json!({"status": "ARCHIVED"})),
            Self::Delete => None,
        }
    }

    #[must_use]
    pub const fn is_destructive(self) -> bool {
        matches!(self, Self::Delete)
    }
}

/// Per-id outcomes of one bulk run.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct BulkReport {
    /// Ids the action succeeded for, in run order.
    pub succeeded: Vec<String>,
    /// Ids the action failed for, with the operator-facing message.
    pub failed: Vec<(String, String)>,
}

impl BulkReport {
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run `action` over every selected id against `resource`, one id at a
/// time in selection order.
///
/// A failure for one id is recorded and the run moves on; there is no
/// rollback of ids already processed. The selection is cleared before
/// returning regardless of the outcomes, so a retry is an explicit
/// re-selection. Callers refetch the list (`query` names the page to
/// restore) once, after the whole run.
#[instrument(skip(backend, selection), fields(count = selection.len()))]
pub async fn run_bulk<R: ResourceApi + ?Sized>(
    backend: &R,
    resource: &str,
    action: BulkAction,
    selection: &mut SelectionSet,
    query: &ListQuery,
) -> BulkReport {
    let mut report = BulkReport::default();
    let payload = action.payload();

    for id in selection.ids() {
        let result = match &payload {
            Some(payload) => backend.update(resource, id, payload).await.map(|_| ()),
            None => backend.delete(resource, id).await,
        };
        match result {
            Ok(()) => report.succeeded.push(id.clone()),
            Err(error) => {
                let message = crate::mutation::MutationError::from(error).to_string();
                tracing::warn!(%id, resource, message, "bulk action failed for record");
                report.failed.push((id.clone(), message));
            }
        }
    }

    selection.clear();
    tracing::info!(
        resource,
        ?action,
        page = query.page(),
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "bulk action finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::backend::testing::ScriptedBackend;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");
        selection.toggle("b");
        selection.toggle("a");
        assert!(!selection.is_selected("a"));
        assert!(selection.is_selected("b"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn select_all_replaces_and_dedups_in_order() {
        let mut selection = SelectionSet::new();
        selection.toggle("stale");
        selection.select_all(["a", "b", "a", "c"]);
        assert_eq!(selection.ids(), ["a", "b", "c"]);
        assert!(!selection.is_selected("stale"));
    }

    #[tokio::test]
    async fn bulk_runs_every_id_and_reports_partial_failure() {
        let backend = ScriptedBackend::new();
        backend.seed("products", serde_json::json!({"id": "a", "status": "DRAFT"}));
        backend.seed("products", serde_json::json!({"id": "b", "status": "DRAFT"}));
        backend.seed("products", serde_json::json!({"id": "c", "status": "DRAFT"}));
        backend.fail_for_id("products", "b", BackendError::Request("500".into()));

        let mut selection = SelectionSet::new();
        selection.select_all(["a", "b", "c"]);

        let report = run_bulk(
            &backend,
            "products",
            BulkAction::Activate,
            &mut selection,
            &ListQuery::new(1, 25),
        )
        .await;

        assert_eq!(backend.calls("products"), 3);
        assert_eq!(report.succeeded, ["a", "c"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "b");
        assert!(selection.is_empty());
    }

    #[tokio::test]
    async fn bulk_delete_removes_records() {
        let backend = ScriptedBackend::new();
        backend.seed("products", serde_json::json!({"id": "a"}));
        backend.seed("products", serde_json::json!({"id": "b"}));

        let mut selection = SelectionSet::new();
        selection.select_all(["a"]);

        let report = run_bulk(
            &backend,
            "products",
            BulkAction::Delete,
            &mut selection,
            &ListQuery::new(1, 25),
        )
        .await;

        assert!(report.all_succeeded());
        let page = backend
            .list("products", &ListQuery::new(1, 25))
            .await
            .expect("list");
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn validation_message_is_carried_verbatim_into_the_report() {
        let backend = ScriptedBackend::new();
        backend.seed("products", serde_json::json!({"id": "a"}));
        backend.fail_for_id(
            "products",
            "a",
            BackendError::Validation("product has open orders".into()),
        );

        let mut selection = SelectionSet::new();
        selection.select_all(["a"]);

        let report = run_bulk(
            &backend,
            "products",
            BulkAction::Delete,
            &mut selection,
            &ListQuery::new(1, 25),
        )
        .await;

        assert_eq!(report.failed[0].1, "product has open orders");
    }

    #[tokio::test]
    async fn empty_selection_is_a_noop() {
        let backend = ScriptedBackend::new();
        let mut selection = SelectionSet::new();

        let report = run_bulk(
            &backend,
            "products",
            BulkAction::Archive,
            &mut selection,
            &ListQuery::new(1, 25),
        )
        .await;

        assert!(report.succeeded.is_empty());
        assert!(report.failed.is_empty());
        assert_eq!(backend.calls("products"), 0);
    }
}
