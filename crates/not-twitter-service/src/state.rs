//! Application state.

use std::sync::Arc;

use not_twitter_store::SqliteStore;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<SqliteStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<SqliteStore>, config: ServiceConfig) -> Self {
        if config.static_dir.is_none() {
            tracing::debug!("STATIC_DIR not set - only the API is served");
        }

        Self { store, config }
    }
}
