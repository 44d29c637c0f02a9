//! Catalog page: category selector, search box and product grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use plumpalicious_core::{CatalogQuery, Product};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// One-shot messages passed to the shop page through the query string after a
/// redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    WrongPassword,
    UploadFailed,
    LoggedIn,
    LoggedOut,
    ImageSaved,
}

impl Flash {
    const fn param(self) -> (&'static str, &'static str) {
        match self {
            Self::WrongPassword => ("error", "wrong_password"),
            Self::UploadFailed => ("error", "upload_failed"),
            Self::LoggedIn => ("notice", "logged_in"),
            Self::LoggedOut => ("notice", "logged_out"),
            Self::ImageSaved => ("notice", "image_saved"),
        }
    }

    /// Shop URL that displays this message.
    #[must_use]
    pub fn shop_url(self) -> String {
        let (key, value) = self.param();
        format!("/shop?{key}={value}")
    }

    fn from_param(key: &str, value: &str) -> Option<Self> {
        [
            Self::WrongPassword,
            Self::UploadFailed,
            Self::LoggedIn,
            Self::LoggedOut,
            Self::ImageSaved,
        ]
        .into_iter()
        .find(|flash| flash.param() == (key, value))
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::WrongPassword => "Wrong password",
            Self::UploadFailed => "Image upload failed. Please choose an image file and try again.",
            Self::LoggedIn => "Admin mode enabled. Upload images from each product card.",
            Self::LoggedOut => "Logged out. Product images were reset.",
            Self::ImageSaved => "Image saved.",
        }
    }
}

/// Shop page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ShopQuery {
    #[serde(flatten)]
    pub filter: CatalogQuery,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Category option for the selector.
#[derive(Clone)]
pub struct CategoryOption {
    pub name: String,
    pub selected: bool,
}

/// Product card display data.
#[derive(Clone)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub price: String,
    pub image: String,
    pub has_image: bool,
    pub customization_available: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            has_image: product.image().is_some(),
            customization_available: product.customization_available,
        }
    }
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub categories: Vec<CategoryOption>,
    pub search: String,
    pub products: Vec<ProductCard>,
    pub is_admin: bool,
    pub order_url: String,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Display the filtered catalog.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ShopQuery>,
) -> impl IntoResponse {
    let selected = query.filter.category();

    let categories = state
        .categories()
        .iter()
        .map(|name| CategoryOption {
            name: name.clone(),
            selected: name == selected,
        })
        .collect();

    let session = state.session().await;
    let products = query
        .filter
        .apply(session.catalog())
        .into_iter()
        .map(ProductCard::from)
        .collect();
    let is_admin = session.is_admin();
    drop(session);

    let error = query
        .error
        .as_deref()
        .and_then(|v| Flash::from_param("error", v))
        .map(|f| f.message().to_string());
    let notice = query
        .notice
        .as_deref()
        .and_then(|v| Flash::from_param("notice", v))
        .map(|f| f.message().to_string());

    ShopTemplate {
        categories,
        search: query.filter.search().to_string(),
        products,
        is_admin,
        order_url: state.config().order_url.clone(),
        error,
        notice,
    }
}
