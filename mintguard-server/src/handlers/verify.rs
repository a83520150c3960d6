//! Gate check handler
//!
//! Handles POST /verify requests: fingerprints the upload and returns the
//! catalog entries that look like near-duplicates of it.
//!
//! This endpoint is a soft gate. It always answers 200; anything that goes
//! wrong (no file, not an image, catalog down, budget exceeded) shows up as a
//! null `query` or an empty match list.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use mintguard_core::{MatchOutcome, MatchResult};
use serde::Serialize;
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::multipart::UploadForm;
use crate::state::AppState;

/// A catalog entry resembling the upload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchItem {
    /// Catalog entry ID
    pub id: Uuid,
    /// Artwork title
    #[schema(example = "Sunset over the bay")]
    pub title: String,
    /// Owner of the matching artwork
    pub owner_id: String,
    /// Public image URL of the matching artwork
    pub image_url: String,
    /// Similarity in [0, 1], `1 - distance / 64`
    #[schema(example = 0.953125)]
    pub score: f64,
    /// Hamming distance between the fingerprints
    #[schema(example = 3)]
    pub distance: u32,
}

impl From<MatchResult> for MatchItem {
    fn from(m: MatchResult) -> Self {
        Self {
            id: m.id,
            title: m.title,
            owner_id: m.owner_id,
            image_url: m.image_url,
            score: m.score,
            distance: m.distance,
        }
    }
}

/// Response for a gate check
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    /// Fingerprint of the upload, null when it could not be computed
    #[schema(example = "f0e1d2c3b4a59687")]
    pub query: Option<String>,
    /// Matches sorted by descending score
    pub similar: Vec<MatchItem>,
    /// Same list as `similar`, kept for clients reading the older field name
    pub matches: Vec<MatchItem>,
}

impl From<MatchOutcome> for VerifyResponse {
    fn from(outcome: MatchOutcome) -> Self {
        let similar: Vec<MatchItem> = outcome.matches.into_iter().map(MatchItem::from).collect();
        Self {
            query: outcome.query.map(|q| q.to_hex()),
            matches: similar.clone(),
            similar,
        }
    }
}

/// Check an upload for near-duplicates in the catalog
///
/// Accepts multipart/form-data with:
/// - **file** (or **image**): The image to check
///
/// Always returns 200. Oversized, slow or malformed uploads yield the empty
/// result.
#[utoipa::path(
    post,
    path = "/verify",
    tag = "Gate",
    request_body(
        content_type = "multipart/form-data",
        description = "Image to check, under the field name `file` or `image`"
    ),
    responses(
        (status = 200, description = "Gate check result (possibly empty)", body = VerifyResponse)
    )
)]
pub async fn verify_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Json<VerifyResponse> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            debug!(error = %rejection, "Not a multipart upload, returning empty gate result");
            return Json(MatchOutcome::empty().into());
        }
    };

    let upload = tokio::time::timeout(
        state.upload_timeout,
        UploadForm::parse(&mut multipart, state.max_file_size),
    )
    .await;

    let file = match upload {
        Ok(Ok(form)) => form.into_file(),
        Ok(Err(e)) => {
            debug!(error = %e, "Unreadable upload, returning empty gate result");
            None
        }
        Err(_) => {
            warn!(
                timeout_ms = state.upload_timeout.as_millis() as u64,
                "Upload not received in time, returning empty gate result"
            );
            None
        }
    };

    let Some(file) = file else {
        return Json(MatchOutcome::empty().into());
    };

    if !file.is_image() {
        debug!(content_type = ?file.content_type, "Upload is not an image");
        return Json(MatchOutcome::empty().into());
    }

    let outcome = state.matcher.find_matches(file.data).await;

    info!(
        query = ?outcome.query.map(|q| q.to_hex()),
        matches = outcome.matches.len(),
        "Gate check complete"
    );

    Json(outcome.into())
}
