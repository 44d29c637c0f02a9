//! Plumpalicious Core - Storefront domain library.
//!
//! This crate provides the catalog view-model used by the storefront binary:
//! - [`types`] - Newtype wrappers for product ids and prices, plus the `Product` record
//! - [`catalog`] - The immutable default catalog and image assignment
//! - [`filter`] - Category and search predicate
//! - [`admin`] - Password-gated admin mode state machine
//! - [`store`] - Key-value persistence of the live catalog
//! - [`session`] - Catalog plus admin flag, the single interactive session
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure logic - no network or
//! file I/O. Persistence goes through the [`store::KeyValueStore`] trait, which
//! the storefront implements on top of the local filesystem.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod catalog;
pub mod filter;
pub mod session;
pub mod store;
pub mod types;

pub use admin::{AdminError, AdminGate, AdminState};
pub use catalog::{Catalog, CatalogError};
pub use filter::{ALL_CATEGORY, CatalogQuery, matches};
pub use session::{SessionError, ShopSession};
pub use store::{
    CATALOG_KEY, CatalogStore, KeyValueStore, LoadSource, MemoryStore, StoreError, UpdateError,
};
pub use types::*;
