//! The single interactive shop session: live catalog plus admin flag.

use secrecy::SecretString;
use thiserror::Error;

use crate::admin::{AdminError, AdminGate, AdminState};
use crate::catalog::{Catalog, CatalogError};
use crate::store::{CatalogStore, KeyValueStore, LoadSource, StoreError, UpdateError};
use crate::types::ProductId;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<UpdateError> for SessionError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::Catalog(e) => Self::Catalog(e),
            UpdateError::Store(e) => Self::Store(e),
        }
    }
}

/// Catalog state and admin gate for one user.
#[derive(Debug)]
pub struct ShopSession {
    catalog: CatalogStore,
    admin: AdminGate,
}

impl ShopSession {
    /// Open a session over `backend`, starting as `Guest`.
    #[must_use]
    pub fn open(
        backend: Box<dyn KeyValueStore>,
        admin_secret: SecretString,
    ) -> (Self, LoadSource) {
        let (catalog, source) = CatalogStore::open(backend);
        let session = Self {
            catalog,
            admin: AdminGate::new(admin_secret),
        };
        (session, source)
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        self.catalog.catalog()
    }

    #[must_use]
    pub const fn admin_state(&self) -> AdminState {
        self.admin.state()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.admin.is_admin()
    }

    /// # Errors
    ///
    /// Returns [`AdminError::WrongPassword`] if `password` does not match.
    pub fn login(&mut self, password: &str) -> Result<(), AdminError> {
        self.admin.login(password)
    }

    /// Leave admin mode, resetting the catalog to its defaults.
    ///
    /// Returns `true` if the session was in admin mode. Logging out as a guest
    /// does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the default catalog cannot be persisted. The session
    /// stays in admin mode with its catalog unchanged.
    pub fn logout(&mut self) -> Result<bool, StoreError> {
        if !self.admin.is_admin() {
            return Ok(false);
        }
        self.catalog.reset()?;
        Ok(self.admin.logout())
    }

    /// Fail unless `id` names a product in the live catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`].
    pub fn ensure_product(&self, id: &ProductId) -> Result<(), CatalogError> {
        self.catalog()
            .get(id)
            .map(|_| ())
            .ok_or_else(|| CatalogError::UnknownProduct(id.clone()))
    }

    /// Assign an encoded image to product `id` and persist the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Admin`] outside admin mode,
    /// [`SessionError::Catalog`] for an unknown id and [`SessionError::Store`]
    /// if persisting fails.
    pub fn upload_image(&mut self, id: &ProductId, image: String) -> Result<(), SessionError> {
        self.admin.require_admin()?;
        self.catalog.set_image(id, image)?;
        Ok(())
    }
}
