//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::UserStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The store is injected so
/// handlers never reach for process-wide globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    store: Arc<dyn UserStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Service configuration
    /// * `store` - User persistence gateway
    #[must_use]
    pub fn new(config: ApiConfig, store: Arc<dyn UserStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn store(&self) -> &dyn UserStore {
        self.inner.store.as_ref()
    }
}
