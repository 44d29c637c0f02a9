//! The default catalog and image assignment.
//!
//! The live catalog is always a copy of [`Catalog::defaults`] with some image
//! fields filled in. Products are never inserted, removed or reordered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::ALL_CATEGORY;
use crate::types::{Price, Product, ProductId};

/// Errors from catalog mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No product with this id exists in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Positional access past the end of the catalog.
    #[error("index {index} out of range for catalog of {len} products")]
    OutOfRange { index: usize, len: usize },
}

struct Seed {
    id: &'static str,
    title: &'static str,
    price: u32,
    tags: &'static [&'static str],
    customization: bool,
}

#[rustfmt::skip]
const DEFAULT_PRODUCTS: &[Seed] = &[
    Seed { id: "soap-blue-flower", title: "Blue Flower Shape Soap (Lavender)", price: 350, tags: &["Soap", "Lavender"], customization: true },
    Seed { id: "soap-beetroot", title: "Beetroot Flower Soap (Rose & Lily)", price: 350, tags: &["Soap", "Rose", "Lily"], customization: true },
    Seed { id: "soap-rice", title: "Rice Soap (Rose & Lavender)", price: 300, tags: &["Soap", "Rice"], customization: true },
    Seed { id: "soap-daisy", title: "Daisy Flower Soap", price: 200, tags: &["Soap"], customization: true },
    Seed { id: "soap-heart", title: "Heart Shape Soap", price: 250, tags: &["Soap"], customization: true },
    Seed { id: "lip-coconut", title: "Coconut Lip Balm", price: 450, tags: &["Lip Balm"], customization: false },
    Seed { id: "lip-lavender", title: "Lavender Lip Balm", price: 450, tags: &["Lip Balm"], customization: false },
    Seed { id: "lip-rose", title: "Rose Lip Balm", price: 450, tags: &["Lip Balm"], customization: false },
    Seed { id: "scrub-slushie", title: "Slushie Body Scrub", price: 950, tags: &["Body Scrub"], customization: false },
    Seed { id: "toner-cooling", title: "Cooling Mist Toner", price: 850, tags: &["Toner"], customization: false },
    Seed { id: "bath-rose", title: "Premium Rose Bath Salt", price: 300, tags: &["Bath Salt"], customization: false },
    Seed { id: "soap-oval", title: "Oval Custom Soap", price: 300, tags: &["Soap"], customization: true },
    Seed { id: "lip-scrub-strawberry", title: "Strawberry Lip Scrub", price: 150, tags: &["Lip Scrub"], customization: false },
    Seed { id: "lip-scrub-lemon", title: "Lemon Lip Scrub", price: 150, tags: &["Lip Scrub"], customization: false },
    Seed { id: "lip-scrub-blueberry", title: "Blueberry Lip Scrub", price: 150, tags: &["Lip Scrub"], customization: false },
    Seed { id: "scrunchie-colorful", title: "Colourful Scrunchie", price: 60, tags: &["Scrunchie"], customization: false },
    Seed { id: "deal-giftbox", title: "Plumpalicious Gift Box (Deal)", price: 1450, tags: &["Deal"], customization: false },
];

/// An ordered sequence of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The immutable default catalog seeded at process start. All images empty.
    #[must_use]
    pub fn defaults() -> Self {
        let products = DEFAULT_PRODUCTS
            .iter()
            .map(|seed| Product {
                id: ProductId::from_static(seed.id),
                title: seed.title.to_owned(),
                price: Price::new(seed.price),
                image: String::new(),
                tags: seed.tags.iter().map(|t| (*t).to_owned()).collect(),
                customization_available: seed.customization,
            })
            .collect();

        Self { products }
    }

    /// Category choices: `"All"` followed by every tag of the default catalog,
    /// deduplicated in first-seen order.
    #[must_use]
    pub fn categories() -> Vec<String> {
        let mut categories = vec![ALL_CATEGORY.to_owned()];
        for tag in DEFAULT_PRODUCTS.iter().flat_map(|seed| seed.tags.iter()) {
            if !categories.iter().any(|c| c == tag) {
                categories.push((*tag).to_owned());
            }
        }
        categories
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Whether this catalog has exactly the default catalog's ids, in order.
    ///
    /// Anything else breaks the fixed cardinality and ordering of the live
    /// catalog and is rejected when rehydrating persisted state.
    #[must_use]
    pub fn has_default_shape(&self) -> bool {
        self.products.len() == DEFAULT_PRODUCTS.len()
            && self
                .products
                .iter()
                .zip(DEFAULT_PRODUCTS)
                .all(|(product, seed)| product.id.as_str() == seed.id)
    }

    /// Rebuild the default catalog with the images of a persisted one.
    ///
    /// Returns `None` unless `persisted` has the default shape. Titles, prices,
    /// tags and customisation flags always come from the defaults; only the
    /// image of each product is carried over.
    #[must_use]
    pub fn rehydrate(persisted: Self) -> Option<Self> {
        if !persisted.has_default_shape() {
            return None;
        }

        let mut catalog = Self::defaults();
        for (product, saved) in catalog.products.iter_mut().zip(persisted.products) {
            product.image = saved.image;
        }
        Some(catalog)
    }

    /// Return a copy with the image of product `id` replaced by `image`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if no product has this id.
    pub fn with_image(
        &self,
        id: &ProductId,
        image: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let index = self
            .products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.clone()))?;
        self.with_image_at(index, image)
    }

    /// Positional form of [`Self::with_image`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::OutOfRange`] if `index >= self.len()`.
    pub fn with_image_at(
        &self,
        index: usize,
        image: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let mut next = self.clone();
        let len = next.products.len();
        let product = next
            .products
            .get_mut(index)
            .ok_or(CatalogError::OutOfRange { index, len })?;
        product.image = image.into();
        Ok(next)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::defaults()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
