//! Application state shared across handlers.

use std::sync::Arc;

use plumpalicious_core::{Catalog, KeyValueStore, LoadSource, ShopSession, StoreError};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinError;

use crate::config::StorefrontConfig;
use crate::local_store::FileStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds the one shop session
/// (live catalog plus admin flag); handlers reach it through the accessors
/// below instead of any global.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    session: Arc<RwLock<ShopSession>>,
    categories: Vec<String>,
}

impl AppState {
    /// Create application state over an arbitrary key-value store.
    #[must_use]
    pub fn new(config: StorefrontConfig, backend: Box<dyn KeyValueStore>) -> Self {
        let (session, source) = ShopSession::open(backend, config.admin_password.clone());

        match &source {
            LoadSource::Persisted => tracing::info!("Catalog restored from persisted state"),
            LoadSource::Default => tracing::info!("No persisted catalog, using defaults"),
            LoadSource::Recovered { reason } => {
                tracing::warn!(%reason, "Persisted catalog unusable, using defaults");
            }
        }

        Self {
            inner: Arc::new(AppStateInner {
                config,
                session: Arc::new(RwLock::new(session)),
                categories: Catalog::categories(),
            }),
        }
    }

    /// Create application state backed by a [`FileStore`] in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StoreError> {
        let store = FileStore::open(&config.data_dir)?;
        Ok(Self::new(config, Box::new(store)))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Category choices for the filter selector.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.inner.categories
    }

    /// Shared read access to the shop session.
    pub async fn session(&self) -> RwLockReadGuard<'_, ShopSession> {
        self.inner.session.read().await
    }

    /// Exclusive access to the shop session for in-memory mutations.
    pub async fn session_mut(&self) -> RwLockWriteGuard<'_, ShopSession> {
        self.inner.session.write().await
    }

    /// Run a session update that writes to the store on the blocking pool.
    ///
    /// The write lock is held until `update` returns, so persisted state and
    /// the live catalog change together.
    ///
    /// # Errors
    ///
    /// Returns [`JoinError`] if `update` panics.
    pub async fn persist<T, F>(&self, update: F) -> Result<T, JoinError>
    where
        F: FnOnce(&mut ShopSession) -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut session = Arc::clone(&self.inner.session).write_owned().await;
        tokio::task::spawn_blocking(move || update(&mut *session)).await
    }
}
