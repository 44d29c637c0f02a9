//! Integration tests for the public shop pages and catalog API.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use plumpalicious_integration_tests::TestContext;

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let response = ctx.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_welcome_links_to_shop() {
    let ctx = TestContext::new();
    let response = ctx.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Welcome to Plumpalicious"));
    assert!(response.body.contains("href=\"/shop\""));
}

#[tokio::test]
async fn test_shop_lists_every_product_as_guest() {
    let ctx = TestContext::new();
    let response = ctx.get("/shop").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = &response.body;
    assert_eq!(body.matches("class=\"card\"").count(), 17);
    assert!(body.contains("Blue Flower Shape Soap (Lavender)"));
    assert!(body.contains("Rs 1450"));
    assert!(body.contains("No Image"));
    assert!(body.contains("Customisation Available"));
    assert!(body.contains("https://www.instagram.com/_plumpalicious/"));
    assert!(body.contains("rel=\"noopener noreferrer\""));

    // Guest sees the login form, never the upload controls
    assert!(body.contains("action=\"/admin/login\""));
    assert!(!body.contains("Upload Image"));
    assert!(!body.contains("Logout Admin"));
}

#[tokio::test]
async fn test_shop_category_selector() {
    let ctx = TestContext::new();
    let response = ctx.get("/shop?category=Lip+Scrub").await;

    assert!(response.body.contains("<option value=\"All\">All</option>"));
    assert!(
        response
            .body
            .contains("<option value=\"Lip Scrub\" selected>Lip Scrub</option>")
    );
    assert_eq!(response.body.matches("class=\"card\"").count(), 3);
}

#[tokio::test]
async fn test_shop_search_with_no_matches() {
    let ctx = TestContext::new();
    let response = ctx.get("/shop?q=candle").await;
    assert_eq!(response.body.matches("class=\"card\"").count(), 0);
    assert!(response.body.contains("No products match your filters."));
    assert!(response.body.contains("value=\"candle\""));
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let ctx = TestContext::new();
    let response = ctx.get("/shop").await;

    let csp = response
        .headers
        .get("content-security-policy")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(csp.contains("img-src 'self' data:"));
    assert_eq!(
        response.headers.get("x-frame-options").map(|v| v.as_bytes()),
        Some(b"DENY".as_slice())
    );
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_echoed_only_when_well_formed() {
    let ctx = TestContext::new();

    let with_id = |id: &str| {
        Request::get("/health")
            .header("x-request-id", id)
            .body(Body::empty())
            .unwrap()
    };

    let response = ctx.send(with_id("edge-42")).await;
    assert_eq!(
        response.headers.get("x-request-id").map(|v| v.as_bytes()),
        Some(b"edge-42".as_slice())
    );

    let response = ctx.send(with_id("not a token")).await;
    let echoed = response
        .headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(!echoed.is_empty());
    assert_ne!(echoed, "not a token");
}

// =============================================================================
// Catalog API
// =============================================================================

#[tokio::test]
async fn test_api_soap_category() {
    let ctx = TestContext::new();
    assert_eq!(
        ctx.catalog_ids("?category=Soap").await,
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

#[tokio::test]
async fn test_api_lip_search_any_case() {
    let ctx = TestContext::new();
    let expected = vec![
        "lip-coconut",
        "lip-lavender",
        "lip-rose",
        "lip-scrub-strawberry",
        "lip-scrub-lemon",
        "lip-scrub-blueberry",
    ];
    assert_eq!(ctx.catalog_ids("?category=All&q=lip").await, expected);
    assert_eq!(ctx.catalog_ids("?q=LIP").await, expected);
}

#[tokio::test]
async fn test_api_unfiltered_catalog() {
    let ctx = TestContext::new();
    let response = ctx.get("/api/catalog").await;
    let json = response.json();

    assert_eq!(json["admin"], "guest");
    assert_eq!(json["category"], "All");
    let products = json["products"].as_array().map(Vec::len);
    assert_eq!(products, Some(17));
    assert_eq!(json["products"][0]["id"], "soap-blue-flower");
    assert_eq!(json["products"][0]["price"], 350);
    assert_eq!(json["products"][0]["img"], "");
    assert_eq!(json["products"][0]["customization"], true);
}

#[tokio::test]
async fn test_api_categories() {
    let ctx = TestContext::new();
    let json = ctx.get("/api/categories").await.json();
    let categories: Vec<&str> = json
        .as_array()
        .map(|a| a.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();

    assert_eq!(categories.first(), Some(&"All"));
    assert_eq!(categories.len(), 13);
    assert!(categories.contains(&"Soap"));
    assert!(categories.contains(&"Deal"));
}
