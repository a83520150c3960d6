//! Fingerprint handler
//!
//! Handles POST /hash requests: computes the perceptual fingerprint and the
//! content digest of an upload so the client can store them with the artwork.

use axum::{
    extract::{Multipart, State},
    Json,
};
use mintguard_core::{digest, PerceptualHasher};
use serde::Serialize;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::multipart::UploadForm;
use crate::state::AppState;

/// Response for a fingerprint request
#[derive(Debug, Serialize, ToSchema)]
pub struct HashResponse {
    /// 64-bit perceptual fingerprint (16 lowercase hex chars), null for non-images
    #[schema(example = "f0e1d2c3b4a59687")]
    pub dhash64: Option<String>,
    /// SHA-256 of the uploaded bytes (64 lowercase hex chars), null when no file
    #[schema(example = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")]
    pub sha256: Option<String>,
    /// Why a field is null
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "not an image")]
    pub note: Option<String>,
}

impl HashResponse {
    fn note(sha256: Option<String>, note: &str) -> Self {
        Self {
            dhash64: None,
            sha256,
            note: Some(note.to_string()),
        }
    }
}

/// Fingerprint an uploaded file
///
/// Accepts multipart/form-data with:
/// - **file** (or **image**): The file to fingerprint
///
/// Missing files and non-image uploads are not errors: the response carries
/// nulls and a `note` instead.
#[utoipa::path(
    post,
    path = "/hash",
    tag = "Fingerprint",
    request_body(
        content_type = "multipart/form-data",
        description = "File to fingerprint, under the field name `file` or `image`"
    ),
    responses(
        (status = 200, description = "Fingerprint computed (fields may be null)", body = HashResponse),
        (status = 400, description = "Malformed multipart body"),
        (status = 413, description = "File too large")
    )
)]
pub async fn hash_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<HashResponse>, ApiError> {
    let form = UploadForm::parse(&mut multipart, state.max_file_size).await?;

    let Some(file) = form.into_file() else {
        return Ok(Json(HashResponse::note(None, "no file uploaded")));
    };

    let sha256 = digest(&file.data).to_hex();

    if !file.is_image() {
        debug!(content_type = ?file.content_type, "Upload is not an image");
        return Ok(Json(HashResponse::note(Some(sha256), "not an image")));
    }

    let bytes = file.data;
    let fingerprint =
        tokio::task::spawn_blocking(move || PerceptualHasher::default().hash_bytes(&bytes))
            .await
            .map_err(|e| ApiError::internal(format!("Fingerprint task failed: {}", e)))?;

    match fingerprint {
        Ok(fingerprint) => Ok(Json(HashResponse {
            dhash64: Some(fingerprint.to_hex()),
            sha256: Some(sha256),
            note: None,
        })),
        Err(e) => {
            warn!(file_name = ?file.file_name, error = %e, "Image upload did not decode");
            Ok(Json(HashResponse::note(
                Some(sha256),
                "image could not be decoded",
            )))
        }
    }
}
