//! Shared application state.

use std::sync::Arc;

use crate::backend::ResourceClient;
use crate::config::AdminConfig;

/// Application state shared across all request handlers.
///
/// Cheaply cloneable; the inner data lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    backend: ResourceClient,
}

impl AppState {
    /// Build the state from loaded configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let backend = ResourceClient::new(&config.backend);
        Self {
            inner: Arc::new(AppStateInner { config, backend }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn backend(&self) -> &ResourceClient {
        &self.inner.backend
    }
}
