//! Application state shared across handlers.

use std::sync::Arc;

use crate::{
    config::AdminConfig,
    seed::{Seed, SeedError},
    store::DataStore,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: DataStore,
}

impl AppState {
    /// Build state seeded with the startup snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded snapshot is malformed.
    pub fn new(config: AdminConfig) -> Result<Self, SeedError> {
        Ok(Self::with_store(config, DataStore::from_seed(Seed::load()?)))
    }

    /// Build state around an existing store.
    #[must_use]
    pub fn with_store(config: AdminConfig, store: DataStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get the data store.
    #[must_use]
    pub fn store(&self) -> &DataStore {
        &self.inner.store
    }
}
