//! The product record shown on each catalog card.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A single catalog entry.
///
/// Field names on the wire match the persisted catalog format:
/// `{"id", "title", "price", "img", "tags", "customization"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Self-contained `data:` URL of the uploaded image. Empty means no image.
    #[serde(rename = "img", default)]
    pub image: String,
    /// Category tags, in display order.
    pub tags: Vec<String>,
    #[serde(rename = "customization", default)]
    pub customization_available: bool,
}

impl Product {
    /// Returns the image payload, or `None` when no image has been uploaded.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        if self.image.is_empty() {
            None
        } else {
            Some(&self.image)
        }
    }

    /// Whether the product carries the given category tag (exact match).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::parse("soap-rice").unwrap(),
            title: "Rice Soap (Rose & Lavender)".to_string(),
            price: Price::new(300),
            image: String::new(),
            tags: vec!["Soap".to_string(), "Rice".to_string()],
            customization_available: true,
        }
    }

    #[test]
    fn test_image_empty_is_none() {
        let mut product = sample();
        assert_eq!(product.image(), None);

        product.image = "data:image/png;base64,AAAA".to_string();
        assert_eq!(product.image(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_has_tag_is_exact() {
        let product = sample();
        assert!(product.has_tag("Soap"));
        assert!(!product.has_tag("soap"));
        assert!(!product.has_tag("Lavender"));
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "soap-rice");
        assert_eq!(json["price"], 300);
        assert_eq!(json["img"], "");
        assert_eq!(json["customization"], true);
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id":"soap-heart","title":"Heart Shape Soap","price":250,"tags":["Soap"]}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.image(), None);
        assert!(!product.customization_available);
    }
}
