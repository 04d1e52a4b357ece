//! Scripted in-memory backend for unit tests.
//!
//! Behaves like the real API at the JSON level: an in-memory collection
//! per resource, generated ids on create, `{items, total, totalPages}`
//! list pages, plus scripting hooks for failures.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{BackendError, ListPage, ResourceApi};
use crate::query::ListQuery;

#[derive(Default)]
pub struct ScriptedBackend {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    fail_next: Mutex<HashMap<String, BackendError>>,
    fail_for_id: Mutex<HashMap<(String, String), BackendError>>,
    mutation_calls: Mutex<HashMap<String, u64>>,
    next_id: AtomicU64,
}

impl ScriptedBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record into a resource collection.
    pub fn seed(&self, resource: &str, record: Value) {
        self.collections
            .lock()
            .expect("lock")
            .entry(resource.to_owned())
            .or_default()
            .push(record);
    }

    /// Fail the next mutation against `resource` with `error`.
    pub fn fail_next(&self, resource: &str, error: BackendError) {
        self.fail_next
            .lock()
            .expect("lock")
            .insert(resource.to_owned(), error);
    }

    /// Fail every mutation against a specific record id.
    pub fn fail_for_id(&self, resource: &str, id: &str, error: BackendError) {
        self.fail_for_id
            .lock()
            .expect("lock")
            .insert((resource.to_owned(), id.to_owned()), error);
    }

    /// Number of mutation calls (create/update/delete) seen so far.
    #[must_use]
    pub fn calls(&self, resource: &str) -> u64 {
        self.mutation_calls
            .lock()
            .expect("lock")
            .get(resource)
            .copied()
            .unwrap_or(0)
    }

    fn record_call(&self, resource: &str) {
        *self
            .mutation_calls
            .lock()
            .expect("lock")
            .entry(resource.to_owned())
            .or_default() += 1;
    }

    fn take_scripted_failure(&self, resource: &str, id: Option<&str>) -> Option<BackendError> {
        if let Some(error) = self.fail_next.lock().expect("lock").remove(resource) {
            return Some(error);
        }
        if let Some(id) = id {
            return self
                .fail_for_id
                .lock()
                .expect("lock")
                .get(&(resource.to_owned(), id.to_owned()))
                .cloned();
        }
        None
    }

    fn record_id(record: &Value) -> Option<String> {
        record
            .get("id")
            .or_else(|| record.get("_id"))
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}

#[async_trait]
impl ResourceApi for ScriptedBackend {
    async fn list(&self, resource: &str, _query: &ListQuery) -> Result<ListPage, BackendError> {
        let collections = self.collections.lock().expect("lock");
        let items = collections.get(resource).cloned().unwrap_or_default();
        let total = items.len() as u64;
        Ok(ListPage {
            items,
            total,
            total_pages: 1,
            stats: None,
        })
    }

    async fn get(&self, resource: &str, id: &str) -> Result<Value, BackendError> {
        let collections = self.collections.lock().expect("lock");
        collections
            .get(resource)
            .and_then(|items| {
                items
                    .iter()
                    .find(|item| Self::record_id(item).as_deref() == Some(id))
            })
            .cloned()
            .ok_or_else(|| BackendError::Request(format!("404 Not Found: {resource}/{id}")))
    }

    async fn create(&self, resource: &str, body: &Value) -> Result<Value, BackendError> {
        self.record_call(resource);
        if let Some(error) = self.take_scripted_failure(resource, None) {
            return Err(error);
        }

        let mut record = body.clone();
        if Self::record_id(&record).is_none() {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(map) = record.as_object_mut() {
                map.insert("id".to_owned(), json!(format!("gen-{id}")));
            }
        }

        self.collections
            .lock()
            .expect("lock")
            .entry(resource.to_owned())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(&self, resource: &str, id: &str, body: &Value) -> Result<Value, BackendError> {
        self.record_call(resource);
        if let Some(error) = self.take_scripted_failure(resource, Some(id)) {
            return Err(error);
        }

        let mut collections = self.collections.lock().expect("lock");
        let items = collections
            .get_mut(resource)
            .ok_or_else(|| BackendError::Request(format!("404 Not Found: {resource}/{id}")))?;
        let record = items
            .iter_mut()
            .find(|item| Self::record_id(item).as_deref() == Some(id))
            .ok_or_else(|| BackendError::Request(format!("404 Not Found: {resource}/{id}")))?;

        if let (Some(target), Some(patch)) = (record.as_object_mut(), body.as_object()) {
            for (key, value) in patch {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(record.clone())
    }

    async fn delete(&self, resource: &str, id: &str) -> Result<(), BackendError> {
        self.record_call(resource);
        if let Some(error) = self.take_scripted_failure(resource, Some(id)) {
            return Err(error);
        }

        let mut collections = self.collections.lock().expect("lock");
        let items = collections
            .get_mut(resource)
            .ok_or_else(|| BackendError::Request(format!("404 Not Found: {resource}/{id}")))?;
        let before = items.len();
        items.retain(|item| Self::record_id(item).as_deref() != Some(id));
        if items.len() == before {
            return Err(BackendError::Request(format!(
                "404 Not Found: {resource}/{id}"
            )));
        }
        Ok(())
    }
}
