//! Product image ingestion.
//!
//! Turns an uploaded image file into a self-contained
//! `data:<mime>;base64,<payload>` URL that can be persisted with the catalog and
//! used directly as an `<img src>`.

use std::path::Path;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;

/// Multipart field carrying the image on the upload form.
pub const IMAGE_FIELD: &str = "image";

/// Reasons an image could not be ingested. The catalog is never changed.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The multipart body could not be read.
    #[error("failed to read upload: {0}")]
    Upload(#[from] MultipartError),

    /// The file is not a recognised image type.
    #[error("not an image: {0}")]
    NotAnImage(String),

    /// The file exceeds the configured upload limit.
    #[error("image is {size} bytes, limit is {max}")]
    TooLarge { size: usize, max: usize },
}

/// Encode raw bytes as a `data:` URL.
#[must_use]
pub fn encode_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}

/// Guess an image MIME type from a file extension.
#[must_use]
pub fn content_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(mime)
}

fn check_size(size: usize, max: usize) -> Result<(), IngestError> {
    if size > max {
        return Err(IngestError::TooLarge { size, max });
    }
    Ok(())
}

/// Read the `image` field of an upload form and encode it.
///
/// Returns `Ok(None)` when the form carries no file (nothing selected).
///
/// # Errors
///
/// Returns [`IngestError`] if the body cannot be read, the part is not an
/// image, or it is larger than `max_bytes`.
pub async fn read_upload(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<Option<String>, IngestError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_ascii_lowercase);

        let bytes = field.bytes().await?;
        if file_name.is_empty() && bytes.is_empty() {
            return Ok(None);
        }

        let content_type = content_type
            .filter(|ct| ct.starts_with("image/"))
            .or_else(|| content_type_for_path(Path::new(&file_name)).map(str::to_string))
            .ok_or_else(|| IngestError::NotAnImage(file_name.clone()))?;
        check_size(bytes.len(), max_bytes)?;

        return Ok(Some(encode_data_url(&content_type, &bytes)));
    }

    Ok(None)
}
