//! Multipart form parsing helpers
//!
//! Both gate endpoints take a single uploaded file. Older clients send it as
//! `image` instead of `file`, so either name is accepted.

use axum::extract::Multipart;

use crate::error::ApiError;
use crate::validation::{is_image_upload, validate_file_size};

/// Field names accepted for the uploaded file, in order of preference.
pub const FILE_FIELD_ALIASES: &[&str] = &["file", "image"];

/// Represents a file uploaded via multipart form
#[derive(Debug, Clone)]
pub struct FileField {
    /// File data bytes
    pub data: Vec<u8>,
    /// Content-Type from the multipart field (if provided)
    pub content_type: Option<String>,
    /// Original filename from the multipart field (if provided)
    pub file_name: Option<String>,
}

impl FileField {
    /// Whether the upload looks like a raster image
    pub fn is_image(&self) -> bool {
        is_image_upload(self.content_type.as_deref(), &self.data)
    }
}

/// A parsed single-file upload form
#[derive(Debug, Default)]
pub struct UploadForm {
    file: Option<FileField>,
}

impl UploadForm {
    /// Parse all fields from a multipart request
    ///
    /// The first field named in [`FILE_FIELD_ALIASES`] wins; later file fields
    /// and unrelated text fields are drained and ignored.
    ///
    /// # Errors
    /// A broken multipart stream is a bad request; an oversized file is a
    /// payload-too-large error.
    pub async fn parse(multipart: &mut Multipart, max_file_size: usize) -> Result<Self, ApiError> {
        let mut file: Option<FileField> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to parse multipart: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            if file.is_some() || !FILE_FIELD_ALIASES.contains(&name.as_str()) {
                // Drain the field so the stream can advance
                field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read field '{}': {}", name, e))
                })?;
                continue;
            }

            let content_type = field.content_type().map(|s| s.to_string());
            let file_name = field.file_name().map(|s| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?
                .to_vec();

            validate_file_size(data.len(), max_file_size)?;

            file = Some(FileField {
                data,
                content_type,
                file_name,
            });
        }

        Ok(Self { file })
    }

    /// Get the file field (optional)
    pub fn get_file(&self) -> Option<&FileField> {
        self.file.as_ref()
    }

    /// Take ownership of the uploaded file
    pub fn into_file(self) -> Option<FileField> {
        self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert!(FILE_FIELD_ALIASES.contains(&"file"));
        assert!(FILE_FIELD_ALIASES.contains(&"image"));
    }

    #[test]
    fn test_empty_form_has_no_file() {
        let form = UploadForm::default();
        assert!(form.get_file().is_none());
        assert!(form.into_file().is_none());
    }

    #[test]
    fn test_file_field_is_image() {
        let field = FileField {
            data: vec![0xFF, 0xD8, 0xFF],
            content_type: None,
            file_name: Some("photo.jpg".to_string()),
        };
        assert!(field.is_image());

        let text = FileField {
            data: b"hello".to_vec(),
            content_type: Some("text/plain".to_string()),
            file_name: None,
        };
        assert!(!text.is_image());
    }
}
