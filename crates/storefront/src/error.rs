//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use plumpalicious_core::{AdminError, CatalogError, SessionError, StoreError};
use thiserror::Error;
use tokio::task::JoinError;

use crate::ingest::IngestError;
use crate::routes::shop::Flash;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing the persisted catalog failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// An uploaded image could not be read. Shown as a notice on the shop page.
    #[error("Ingestion failed: {0}")]
    IngestionFailed(#[from] IngestError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Action requires admin mode.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A session update on the blocking pool panicked or was cancelled.
    #[error("Session task failed: {0}")]
    SessionTask(#[from] JoinError),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Admin(AdminError::NotAdmin) => {
                Self::Unauthorized("admin mode required".to_string())
            }
            SessionError::Admin(AdminError::WrongPassword) => {
                Self::Unauthorized("wrong password".to_string())
            }
            SessionError::Catalog(e) => e.into(),
            SessionError::Store(e) => Self::Persistence(e),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self::NotFound(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Persistence(_) | Self::SessionTask(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::IngestionFailed(err) => {
                tracing::warn!(error = %err, "Image upload rejected");
                return Redirect::to(&Flash::UploadFailed.shop_url()).into_response();
            }
            Self::Persistence(_) | Self::SessionTask(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Persistence(_) | Self::SessionTask(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
