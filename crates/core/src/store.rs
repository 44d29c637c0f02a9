//! Persistence of the live catalog in a key-value store.
//!
//! The whole catalog is stored as one JSON array under [`CATALOG_KEY`]. Loading
//! never fails: missing, unreadable or malformed data falls back to the
//! default catalog and the reason is reported through [`LoadSource`].

use std::collections::HashMap;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::types::ProductId;

/// Key under which the live catalog is persisted.
pub const CATALOG_KEY: &str = "plumpalicious_products";

/// Errors from the key-value store and catalog (de)serialization.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog could not be serialized.
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Persisted data exists but is not a valid catalog.
    #[error("malformed persisted state: {0}")]
    MalformedPersistedState(String),

    /// The key cannot be mapped onto the backing storage.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string-keyed, string-valued persistent store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Where the live catalog came from at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Rehydrated from the persisted catalog.
    Persisted,
    /// Nothing persisted; using the default catalog.
    Default,
    /// Persisted data was unusable; using the default catalog.
    Recovered { reason: String },
}

/// Serialize a catalog to its persisted JSON form.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] if serialization fails.
pub fn serialize_catalog(catalog: &Catalog) -> Result<String, StoreError> {
    serde_json::to_string(catalog).map_err(StoreError::Serialize)
}

/// Parse a persisted catalog.
///
/// # Errors
///
/// Returns [`StoreError::MalformedPersistedState`] if `raw` is not a JSON
/// product array.
pub fn deserialize_catalog(raw: &str) -> Result<Catalog, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::MalformedPersistedState(e.to_string()))
}

/// Errors from updating a product image through the [`CatalogStore`].
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owns the live catalog and keeps it in step with the backing store.
pub struct CatalogStore {
    backend: Box<dyn KeyValueStore>,
    catalog: Catalog,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("products", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

impl CatalogStore {
    /// Open the store, rehydrating the live catalog from `backend`.
    #[must_use]
    pub fn open(backend: Box<dyn KeyValueStore>) -> (Self, LoadSource) {
        let (catalog, source) = Self::load(backend.as_ref());
        (Self { backend, catalog }, source)
    }

    /// Read the persisted catalog, falling back to the default catalog.
    ///
    /// Only images are taken from persisted state; every other product field
    /// comes from [`Catalog::defaults`].
    #[must_use]
    pub fn load(backend: &dyn KeyValueStore) -> (Catalog, LoadSource) {
        let raw = match backend.get(CATALOG_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (Catalog::defaults(), LoadSource::Default),
            Err(e) => {
                return (
                    Catalog::defaults(),
                    LoadSource::Recovered {
                        reason: e.to_string(),
                    },
                );
            }
        };

        let persisted = match deserialize_catalog(&raw) {
            Ok(persisted) => persisted,
            Err(e) => {
                return (
                    Catalog::defaults(),
                    LoadSource::Recovered {
                        reason: e.to_string(),
                    },
                );
            }
        };

        match Catalog::rehydrate(persisted) {
            Some(catalog) => (catalog, LoadSource::Persisted),
            None => (
                Catalog::defaults(),
                LoadSource::Recovered {
                    reason: "persisted catalog does not match the default product list"
                        .to_owned(),
                },
            ),
        }
    }

    /// The live catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Persist `catalog`, then make it the live catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails. The live catalog
    /// is left unchanged in that case.
    pub fn save(&mut self, catalog: Catalog) -> Result<(), StoreError> {
        let raw = serialize_catalog(&catalog)?;
        self.backend.set(CATALOG_KEY, &raw)?;
        self.catalog = catalog;
        Ok(())
    }

    /// Replace the image of product `id` and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::Catalog`] for an unknown id and
    /// [`UpdateError::Store`] if persisting fails.
    pub fn set_image(
        &mut self,
        id: &ProductId,
        image: impl Into<String>,
    ) -> Result<(), UpdateError> {
        let next = self.catalog.with_image(id, image)?;
        self.save(next)?;
        Ok(())
    }

    /// Persist and restore the default catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the live catalog is unchanged.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.save(Catalog::defaults())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::filter::CatalogQuery;

    /// Store whose writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
    }

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn store_with(raw: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(CATALOG_KEY, raw).unwrap();
        store
    }

    #[test]
    fn test_round_trip_default_and_modified() {
        let defaults = Catalog::defaults();
        let raw = serialize_catalog(&defaults).unwrap();
        assert_eq!(deserialize_catalog(&raw).unwrap(), defaults);

        let modified = defaults
            .with_image(&id("lip-rose"), "data:image/jpeg;base64,/9j/4AAQ")
            .unwrap()
            .with_image(&id("deal-giftbox"), "data:image/png;base64,iVBORw0K")
            .unwrap();
        let raw = serialize_catalog(&modified).unwrap();
        assert_eq!(deserialize_catalog(&raw).unwrap(), modified);
    }

    #[test]
    fn test_load_missing_uses_defaults() {
        let (catalog, source) = CatalogStore::load(&MemoryStore::new());
        assert_eq!(catalog, Catalog::defaults());
        assert_eq!(source, LoadSource::Default);
    }

    #[test]
    fn test_load_malformed_falls_back_silently() {
        for raw in ["", "not json", "{\"id\":1}", "[{\"title\":\"x\"}]"] {
            let (catalog, source) = CatalogStore::load(&store_with(raw));
            assert_eq!(catalog, Catalog::defaults());
            assert!(matches!(source, LoadSource::Recovered { .. }), "{raw}");
        }
    }

    #[test]
    fn test_load_rejects_wrong_shape() {
        let (catalog, source) = CatalogStore::load(&store_with("[]"));
        assert_eq!(catalog, Catalog::defaults());
        assert!(matches!(source, LoadSource::Recovered { .. }));
    }

    #[test]
    fn test_load_persisted() {
        let modified = Catalog::defaults()
            .with_image(&id("soap-oval"), "data:image/gif;base64,R0lG")
            .unwrap();
        let raw = serialize_catalog(&modified).unwrap();

        let (catalog, source) = CatalogStore::load(&store_with(&raw));
        assert_eq!(catalog, modified);
        assert_eq!(source, LoadSource::Persisted);
    }

    #[test]
    fn test_load_ignores_tampered_product_fields() {
        let raw = serialize_catalog(&Catalog::defaults())
            .unwrap()
            .replace("Daisy Flower Soap", "FREE STUFF")
            .replace(
                "\"price\":1450,\"img\":\"\",\"tags\":[\"Deal\"]",
                "\"price\":1,\"img\":\"data:x\",\"tags\":[\"Soap\"]",
            );
        assert!(raw.contains("FREE STUFF"));
        assert!(raw.contains("[\"Soap\"]"));

        let (catalog, source) = CatalogStore::load(&store_with(&raw));
        assert_eq!(source, LoadSource::Persisted);
        assert_eq!(
            catalog,
            Catalog::defaults()
                .with_image(&id("deal-giftbox"), "data:x")
                .unwrap()
        );
        let soaps = CatalogQuery::new("Soap", "").apply(&catalog);
        assert_eq!(soaps.len(), 6);
    }

    #[test]
    fn test_set_image_persists() {
        let (mut store, _) = CatalogStore::open(Box::new(MemoryStore::new()));
        store.set_image(&id("toner-cooling"), "data:x").unwrap();

        assert_eq!(
            store.catalog().get(&id("toner-cooling")).unwrap().image(),
            Some("data:x")
        );
        let (persisted, source) = CatalogStore::load(store.backend.as_ref());
        assert_eq!(source, LoadSource::Persisted);
        assert_eq!(&persisted, store.catalog());
    }

    #[test]
    fn test_set_image_unknown_leaves_state() {
        let (mut store, _) = CatalogStore::open(Box::new(MemoryStore::new()));
        let err = store.set_image(&id("nope"), "data:x").unwrap_err();
        assert!(matches!(err, UpdateError::Catalog(CatalogError::UnknownProduct(_))));
        assert_eq!(store.catalog(), &Catalog::defaults());
        assert_eq!(store.backend.get(CATALOG_KEY).unwrap(), None);
    }

    #[test]
    fn test_failed_write_keeps_memory_in_sync() {
        let (mut store, _) = CatalogStore::open(Box::new(ReadOnlyStore(MemoryStore::new())));
        let err = store.set_image(&id("soap-heart"), "data:x").unwrap_err();
        assert!(matches!(err, UpdateError::Store(StoreError::Io(_))));
        assert_eq!(store.catalog(), &Catalog::defaults());
    }

    #[test]
    fn test_reset_restores_and_persists_defaults() {
        let (mut store, _) = CatalogStore::open(Box::new(MemoryStore::new()));
        store.set_image(&id("soap-rice"), "data:x").unwrap();
        store.reset().unwrap();

        assert_eq!(store.catalog(), &Catalog::defaults());
        let raw = store.backend.get(CATALOG_KEY).unwrap().unwrap();
        assert_eq!(deserialize_catalog(&raw).unwrap(), Catalog::defaults());
    }
}
