//! Application state shared across handlers.

use std::sync::Arc;

use dessert_shop_core::Catalog;

use crate::catalog::LoadedCatalog;
use crate::config::StorefrontConfig;
use crate::middleware::SessionLocks;
use crate::view::ProductGrid;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog and its rendered
/// grid are fixed for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    catalog_error: Option<String>,
    grid: ProductGrid,
    session_locks: SessionLocks,
}

impl AppState {
    /// Create a new application state, rendering the product grid once.
    #[must_use]
    pub fn new(config: StorefrontConfig, loaded: LoadedCatalog) -> Self {
        let grid = ProductGrid::render(loaded.catalog.products());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Arc::new(loaded.catalog),
                catalog_error: loaded.error,
                grid,
                session_locks: SessionLocks::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Shared handle to the catalog.
    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.inner.catalog)
    }

    /// Message to show instead of the grid when the catalog failed to load.
    #[must_use]
    pub fn catalog_error(&self) -> Option<&str> {
        self.inner.catalog_error.as_deref()
    }

    /// The grid as rendered at load time, with every card in the zero state.
    #[must_use]
    pub fn grid(&self) -> &ProductGrid {
        &self.inner.grid
    }

    /// Locks that queue requests belonging to the same session.
    #[must_use]
    pub fn session_locks(&self) -> &SessionLocks {
        &self.inner.session_locks
    }
}
