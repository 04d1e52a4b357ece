//! Resource client for the backing commerce REST API.
//!
//! Every admin view reads and writes through this surface:
//!
//! ```text
//! GET    {base}/api/admin/{resource}?{filters}  -> { items, total, totalPages, stats? }
//! POST   {base}/api/admin/{resource}            -> created record | { error }
//! PUT    {base}/api/admin/{resource}/{id}       -> updated record | { error }
//! DELETE {base}/api/admin/{resource}/{id}       -> 2xx | { error }
//! ```
//!
//! The client is deliberately thin: JSON in, JSON out, no retry, no
//! cache, no request deduplication, no client-side timeout beyond the
//! transport default. Each call is independent.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::instrument;

use crate::config::BackendConfig;
use crate::query::ListQuery;

mod error;
#[cfg(test)]
pub mod testing;

pub use error::BackendError;

/// One page of a resource collection as the backing API reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    /// Records on this page, still untyped.
    pub items: Vec<Value>,
    /// Total records matching the query across all pages.
    #[serde(default)]
    pub total: u64,
    /// Total number of pages for the query.
    #[serde(default)]
    pub total_pages: u64,
    /// Optional pre-aggregated stats block (e.g. trend buckets).
    #[serde(default)]
    pub stats: Option<Value>,
}

impl ListPage {
    /// Decode the page's items into a typed collection.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Request`] if any record fails to decode;
    /// a malformed response is indistinguishable from a failed one.
    pub fn decode_items<T: DeserializeOwned>(&self) -> Result<Vec<T>, BackendError> {
        self.items
            .iter()
            .map(|item| {
                serde_json::from_value(item.clone())
                    .map_err(|e| BackendError::Request(format!("malformed record: {e}")))
            })
            .collect()
    }
}

/// The operations every admin view needs from the backing API.
///
/// A trait seam so the mutation coordinator, bulk runner, and
/// aggregating handlers can be exercised against a scripted fake.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Fetch one page of a collection.
    async fn list(&self, resource: &str, query: &ListQuery) -> Result<ListPage, BackendError>;

    /// Fetch a single record by id.
    async fn get(&self, resource: &str, id: &str) -> Result<Value, BackendError>;

    /// Create a record; returns the created record.
    async fn create(&self, resource: &str, body: &Value) -> Result<Value, BackendError>;

    /// Update a record; returns the updated record.
    async fn update(&self, resource: &str, id: &str, body: &Value) -> Result<Value, BackendError>;

    /// Delete a record.
    async fn delete(&self, resource: &str, id: &str) -> Result<(), BackendError>;
}

/// Reqwest-backed client for the commerce API.
///
/// Cheaply cloneable via `Arc`; holds the base URL and the service
/// bearer token.
#[derive(Clone)]
pub struct ResourceClient {
    inner: Arc<ResourceClientInner>,
}

struct ResourceClientInner {
    client: reqwest::Client,
    base_url: String,
    token: secrecy::SecretString,
}

/// Error body shape the backing API uses for rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ResourceClient {
    /// Create a new client from backend configuration.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(ResourceClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                token: config.token.clone(),
            }),
        }
    }

    /// Issue one request against the admin API surface.
    ///
    /// Serializes `body` as JSON (with `Content-Type: application/json`)
    /// when present. Any non-2xx status becomes an error carrying the
    /// status code and, when parseable, the server's error message. A
    /// 400/422 with a parseable body is a validation rejection.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, BackendError> {
        let url = format!("{}/api/admin/{}", self.inner.base_url, path);

        let mut request = self
            .inner
            .client
            .request(method, &url)
            .bearer_auth(self.inner.token.expose_secret());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Request(format!("transport: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Request(format!("transport: {e}")))?;

        if status.is_success() {
            if text.is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text)
                .map_err(|e| BackendError::Request(format!("malformed response: {e}")));
        }

        let server_message = serde_json::from_str::<ErrorBody>(&text).ok().map(|b| b.error);
        match server_message {
            Some(message)
                if status == StatusCode::BAD_REQUEST
                    || status == StatusCode::UNPROCESSABLE_ENTITY =>
            {
                Err(BackendError::Validation(message))
            }
            Some(message) => Err(BackendError::Request(format!("{status}: {message}"))),
            None => Err(BackendError::Request(status.to_string())),
        }
    }
}

#[async_trait]
impl ResourceApi for ResourceClient {
    #[instrument(skip(self, query), fields(query = %query.to_query_string()))]
    async fn list(&self, resource: &str, query: &ListQuery) -> Result<ListPage, BackendError> {
        let path = format!("{resource}?{}", query.to_query_string());
        let value = self.request(Method::GET, &path, None).await?;
        serde_json::from_value(value)
            .map_err(|e| BackendError::Request(format!("malformed list response: {e}")))
    }

    #[instrument(skip(self))]
    async fn get(&self, resource: &str, id: &str) -> Result<Value, BackendError> {
        self.request(Method::GET, &format!("{resource}/{id}"), None)
            .await
    }

    #[instrument(skip(self, body))]
    async fn create(&self, resource: &str, body: &Value) -> Result<Value, BackendError> {
        self.request(Method::POST, resource, Some(body)).await
    }

    #[instrument(skip(self, body))]
    async fn update(&self, resource: &str, id: &str, body: &Value) -> Result<Value, BackendError> {
        self.request(Method::PUT, &format!("{resource}/{id}"), Some(body))
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, resource: &str, id: &str) -> Result<(), BackendError> {
        self.request(Method::DELETE, &format!("{resource}/{id}"), None)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_page_decodes_camel_case_fields() {
        let page: ListPage = serde_json::from_str(
            r#"{"items":[{"id":"a"}],"total":41,"totalPages":2,"stats":{"trend":[]}}"#,
        )
        .expect("decode");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 41);
        assert_eq!(page.total_pages, 2);
        assert!(page.stats.is_some());
    }

    #[test]
    fn decode_items_reports_malformed_records() {
        #[derive(Debug, Deserialize)]
        struct Record {
            #[allow(dead_code)]
            id: String,
        }

        let page: ListPage =
            serde_json::from_str(r#"{"items":[{"id":"a"},{"no_id":true}],"total":2,"totalPages":1}"#)
                .expect("decode");
        let result = page.decode_items::<Record>();
        assert!(matches!(result, Err(BackendError::Request(_))));
    }
}
