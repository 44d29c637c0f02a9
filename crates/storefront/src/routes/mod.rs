//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Welcome splash
//! GET  /shop                    - Catalog page (?category=&q=)
//!
//! # Admin mode
//! POST /admin/login             - Enter admin mode (form field `password`)
//! POST /admin/logout            - Leave admin mode, reset catalog
//!
//! # Products
//! POST /products/{id}/image     - Upload product image (multipart field `image`)
//!
//! # JSON API
//! GET  /api/catalog             - Filtered live catalog (?category=&q=)
//! GET  /api/categories          - Category list
//! ```

pub mod admin;
pub mod api;
pub mod home;
pub mod products;
pub mod shop;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Multipart framing allowance on top of the image size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the admin mode routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
}

/// Create the product routes router.
pub fn product_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/{id}/image", post(products::upload_image))
        .layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
        ))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(api::catalog::catalog))
        .route("/categories", get(api::catalog::categories))
}

/// Create all routes for the storefront.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(home::welcome))
        .route("/shop", get(shop::index))
        .nest("/admin", admin_routes())
        .nest("/products", product_routes(max_upload_bytes))
        .nest("/api", api_routes())
}
