//! Product image upload.

use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use plumpalicious_core::ProductId;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::ingest;
use crate::routes::shop::Flash;
use crate::state::AppState;

/// Store an uploaded image on product `id` (admin mode only).
///
/// The multipart body is read before the session lock is taken. An empty
/// submission is a no-op; an unreadable or non-image file leaves the catalog
/// unchanged and shows a notice.
#[instrument(skip(state, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Response> {
    let product_id =
        ProductId::parse(&id).map_err(|e| AppError::NotFound(format!("product {id}: {e}")))?;

    {
        let session = state.session().await;
        if !session.is_admin() {
            return Err(AppError::Unauthorized("admin mode required".to_string()));
        }
        session.ensure_product(&product_id)?;
    }

    let Some(image) =
        ingest::read_upload(&mut multipart, state.config().max_upload_bytes).await?
    else {
        tracing::debug!(product = %product_id, "No file selected");
        return Ok(Redirect::to("/shop").into_response());
    };

    let size = image.len();
    let target = product_id.clone();
    state
        .persist(move |session| session.upload_image(&target, image))
        .await??;
    tracing::info!(product = %product_id, encoded_bytes = size, "Product image saved");

    Ok(Redirect::to(&Flash::ImageSaved.shop_url()).into_response())
}
