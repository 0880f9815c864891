//! Photo screening for multipart uploads
//!
//! A photo is accepted only when both its declared MIME type and its filename extension are
//! on the configured allowlists. Screening runs on the part headers, before any byte is
//! written to the staging directory.

use intake_core::AppError;
use intake_storage::keys::declared_extension;

/// Message returned for a photo that is not an allowed image type.
pub const PHOTO_TYPE_REJECTED: &str = "Only images are allowed (jpeg, jpg, png, gif)";

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Check the declared MIME type and extension of a photo part.
///
/// Returns the lowercased extension on success.
pub fn screen_photo(
    filename: &str,
    content_type: &str,
    allowed_extensions: &[String],
    allowed_content_types: &[String],
) -> Result<String, AppError> {
    let mime = normalize_mime_type(content_type);
    let mime_allowed = allowed_content_types.iter().any(|ct| *ct == mime);

    let extension = declared_extension(filename);
    let extension_allowed = extension
        .as_ref()
        .is_some_and(|ext| allowed_extensions.contains(ext));

    match extension {
        Some(ext) if mime_allowed && extension_allowed => Ok(ext),
        _ => {
            tracing::debug!(
                filename = %filename,
                content_type = %content_type,
                mime_allowed,
                extension_allowed,
                "Photo rejected by type screening"
            );
            Err(AppError::AttachmentRejected(PHOTO_TYPE_REJECTED.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowlists() -> (Vec<String>, Vec<String>) {
        (
            ["jpeg", "jpg", "png", "gif"].map(String::from).to_vec(),
            ["image/jpeg", "image/jpg", "image/png", "image/gif"]
                .map(String::from)
                .to_vec(),
        )
    }

    fn screen(filename: &str, content_type: &str) -> Result<String, AppError> {
        let (extensions, types) = allowlists();
        screen_photo(filename, content_type, &extensions, &types)
    }

    #[test]
    fn accepts_matching_type_and_extension() {
        assert_eq!(screen("me.JPG", "image/jpeg").unwrap(), "jpg");
        assert_eq!(screen("me.png", "IMAGE/PNG; charset=binary").unwrap(), "png");
    }

    #[test]
    fn both_checks_must_pass() {
        assert!(screen("me.pdf", "image/jpeg").is_err());
        assert!(screen("me.jpg", "application/pdf").is_err());
        assert!(screen("me", "image/jpeg").is_err());
        assert!(screen(".png", "image/png").is_err());
    }

    #[test]
    fn rejection_is_an_attachment_error() {
        match screen("notes.txt", "text/plain") {
            Err(AppError::AttachmentRejected(msg)) => assert_eq!(msg, PHOTO_TYPE_REJECTED),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
