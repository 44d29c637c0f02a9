//! Read-only JSON views of the live catalog.

use axum::{
    Json,
    extract::{Query, State},
};
use plumpalicious_core::{AdminState, CatalogQuery, Product};
use serde::Serialize;

use crate::state::AppState;

/// Response body for `GET /api/catalog`.
#[derive(Serialize)]
pub struct CatalogResponse {
    pub admin: AdminState,
    pub category: String,
    pub search: String,
    pub products: Vec<Product>,
}

/// Filtered live catalog, in catalog order, in the persisted product format.
pub async fn catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<CatalogResponse> {
    let session = state.session().await;
    let products = query
        .apply(session.catalog())
        .into_iter()
        .cloned()
        .collect();

    Json(CatalogResponse {
        admin: session.admin_state(),
        category: query.category().to_string(),
        search: query.search().to_string(),
        products,
    })
}

/// Derived category list, `"All"` first.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.categories().to_vec())
}
