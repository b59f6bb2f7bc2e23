//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::catalog::{CatalogClient, SearchDebouncer};
use crate::config::NexusConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool, the catalog client, and the
/// search debouncer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: NexusConfig,
    pool: PgPool,
    catalog: CatalogClient,
    debouncer: SearchDebouncer,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: NexusConfig, pool: PgPool) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let debouncer = SearchDebouncer::new(Duration::from_millis(config.catalog.debounce_ms));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
                debouncer,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &NexusConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the shared search debouncer.
    #[must_use]
    pub fn debouncer(&self) -> &SearchDebouncer {
        &self.inner.debouncer
    }
}
