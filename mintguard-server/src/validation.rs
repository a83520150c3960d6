//! Upload validation module
//!
//! Provides validation utilities for multipart file uploads.

use mintguard_core::PerceptualHasher;

use crate::error::ApiError;

/// Validates the size of an uploaded file
///
/// Returns an error if the file exceeds the maximum size.
pub fn validate_file_size(size: usize, max_size: usize) -> Result<(), ApiError> {
    if size > max_size {
        let max_mb = max_size / (1024 * 1024);
        let actual_mb = size / (1024 * 1024);
        Err(ApiError::payload_too_large(format!(
            "File too large: {} MB exceeds maximum of {} MB",
            actual_mb, max_mb
        )))
    } else {
        Ok(())
    }
}

/// Decides whether an upload should be treated as an image.
///
/// A declared `image/*` type is trusted. A missing or generic
/// `application/octet-stream` type falls back to sniffing the magic bytes.
/// Any other declared type is not an image.
pub fn is_image_upload(content_type: Option<&str>, data: &[u8]) -> bool {
    match content_type.map(|ct| ct.trim().to_lowercase()) {
        Some(ct) if ct.starts_with("image/") => true,
        None => PerceptualHasher::is_supported_format(data),
        Some(ct) if ct.is_empty() || ct.starts_with("application/octet-stream") => {
            PerceptualHasher::is_supported_format(data)
        }
        Some(_) => false,
    }
}
