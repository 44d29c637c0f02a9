//! Integration tests for the Plumpalicious storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p plumpalicious-integration-tests
//! ```
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`;
//! no server or network is involved. Each [`TestContext`] gets its own
//! temporary data directory, removed when the context is dropped.

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use plumpalicious_storefront::build_router;
use plumpalicious_storefront::config::StorefrontConfig;
use plumpalicious_storefront::state::AppState;
use tempfile::TempDir;
use tower::ServiceExt;

/// Password the test storefront is configured with.
pub const ADMIN_PASSWORD: &str = "plumpadmin";

/// Boundary used by [`TestContext::upload`].
const BOUNDARY: &str = "plumpalicious-test-boundary";

/// A response reduced to what tests assert on.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// A storefront router over a private data directory.
pub struct TestContext {
    pub router: Router,
    pub data_dir: PathBuf,
    _tmp: Option<TempDir>,
}

impl TestContext {
    /// Fresh storefront with an empty data directory.
    #[must_use]
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = Self::with_data_dir(tmp.path());
        Self {
            _tmp: Some(tmp),
            ..ctx
        }
    }

    /// Fresh storefront process over an existing data directory.
    ///
    /// Simulates a restart: the catalog is rehydrated, admin mode is not. The
    /// directory must outlive the returned context.
    #[must_use]
    pub fn with_data_dir(data_dir: &Path) -> Self {
        let config = StorefrontConfig {
            data_dir: data_dir.to_path_buf(),
            max_upload_bytes: 1024,
            ..StorefrontConfig::default()
        };
        let state = AppState::from_config(config).unwrap();

        Self {
            router: build_router(state),
            data_dir: data_dir.to_path_buf(),
            _tmp: None,
        }
    }

    /// Path of the persisted catalog file.
    #[must_use]
    pub fn catalog_file(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.json", plumpalicious_core::CATALOG_KEY))
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn login(&self, password: &str) -> TestResponse {
        self.post_form("/admin/login", &format!("password={password}"))
            .await
    }

    pub async fn logout(&self) -> TestResponse {
        self.post_form("/admin/logout", "").await
    }

    /// Submit the upload form for `product_id` with one file part.
    pub async fn upload(
        &self,
        product_id: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::post(format!("/products/{product_id}/image"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Ids of the products returned by `/api/catalog` for `query`.
    pub async fn catalog_ids(&self, query: &str) -> Vec<String> {
        let response = self.get(&format!("/api/catalog{query}")).await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect()
    }

    /// Image field of one product as reported by `/api/catalog`.
    pub async fn image_of(&self, product_id: &str) -> String {
        let response = self.get("/api/catalog").await;
        response.json()["products"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["id"] == product_id)
            .map(|p| p["img"].as_str().unwrap().to_string())
            .unwrap()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
