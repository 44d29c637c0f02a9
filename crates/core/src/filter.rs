//! Category and search filtering of the catalog.

use serde::Deserialize;

use crate::catalog::Catalog;
use crate::types::Product;

/// Synthetic category that matches every product.
pub const ALL_CATEGORY: &str = "All";

/// Whether `product` passes the category filter and the search text.
///
/// A product matches when the category is `"All"` or one of its tags, and the
/// search text is empty or a case-insensitive substring of its title.
#[must_use]
pub fn matches(product: &Product, category: &str, search: &str) -> bool {
    let category_ok = category == ALL_CATEGORY || product.has_tag(category);
    let search_ok =
        search.is_empty() || product.title.to_lowercase().contains(&search.to_lowercase());
    category_ok && search_ok
}

/// Filter state as submitted from the shop page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "q")]
    pub search: Option<String>,
}

impl CatalogQuery {
    #[must_use]
    pub fn new(category: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            search: Some(search.into()),
        }
    }

    /// Selected category, `"All"` when unset or blank.
    #[must_use]
    pub fn category(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => ALL_CATEGORY,
        }
    }

    #[must_use]
    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }

    /// Matching products in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        let category = self.category();
        let search = self.search();
        catalog
            .iter()
            .filter(|p| matches(p, category, search))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_all_with_empty_search_matches_everything() {
        for product in &Catalog::defaults() {
            assert!(matches(product, ALL_CATEGORY, ""));
        }
    }

    #[test]
    fn test_category_matches_iff_tagged() {
        let catalog = Catalog::defaults();
        for category in Catalog::categories().iter().skip(1) {
            for product in &catalog {
                assert_eq!(
                    matches(product, category, ""),
                    product.tags.contains(category),
                    "{} / {category}",
                    product.id
                );
            }
        }
    }

    #[test]
    fn test_search_matches_iff_case_insensitive_substring() {
        let catalog = Catalog::defaults();
        for text in ["lip", "LIP", "Soap", "rose", "(deal)", "zzz", "Lip Scrub"] {
            for product in &catalog {
                let expected = product.title.to_lowercase().contains(&text.to_lowercase());
                assert_eq!(matches(product, ALL_CATEGORY, text), expected);
            }
        }
    }

    #[test]
    fn test_soap_category_scenario() {
        let catalog = Catalog::defaults();
        let result = CatalogQuery::new("Soap", "").apply(&catalog);
        assert_eq!(
            ids(&result),
            vec![
                "soap-blue-flower",
                "soap-beetroot",
                "soap-rice",
                "soap-daisy",
                "soap-heart",
                "soap-oval",
            ]
        );
    }

    #[test]
    fn test_lip_search_scenario() {
        let catalog = Catalog::defaults();
        let expected = vec![
            "lip-coconut",
            "lip-lavender",
            "lip-rose",
            "lip-scrub-strawberry",
            "lip-scrub-lemon",
            "lip-scrub-blueberry",
        ];
        for text in ["lip", "LIP", "Lip"] {
            let result = CatalogQuery::new(ALL_CATEGORY, text).apply(&catalog);
            assert_eq!(ids(&result), expected);
        }
    }

    #[test]
    fn test_category_and_search_combine() {
        let catalog = Catalog::defaults();
        let result = CatalogQuery::new("Soap", "rose").apply(&catalog);
        assert_eq!(ids(&result), vec!["soap-beetroot", "soap-rice"]);
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let catalog = Catalog::defaults();
        assert!(CatalogQuery::new("Candles", "").apply(&catalog).is_empty());
    }

    #[test]
    fn test_query_defaults_to_all() {
        let query = CatalogQuery::default();
        assert_eq!(query.category(), ALL_CATEGORY);
        assert_eq!(query.search(), "");
        assert_eq!(query.apply(&Catalog::defaults()).len(), 17);

        let blank = CatalogQuery {
            category: Some(String::new()),
            search: None,
        };
        assert_eq!(blank.category(), ALL_CATEGORY);
    }
}
