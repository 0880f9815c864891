//! Multipart transport for application submissions
//!
//! Text parts become [`SubmissionFields`]. The single `photo` file part is screened on its
//! headers and then streamed chunk by chunk into the staging directory under a generated
//! name, so a photo is never held in memory as a whole. Every early return removes whatever
//! was already staged.

use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use chrono::Utc;
use intake_core::constants::PHOTO_FIELD;
use intake_core::models::{StagedAttachment, SubmissionFields};
use intake_core::{AppError, Config};
use intake_storage::discard_staged;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::validation::screen_photo;

const FILE_TOO_LARGE: &str = "File upload error: File too large";
const UNEXPECTED_FIELD: &str = "File upload error: Unexpected field";
const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// Upload limits and staging location taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits<'a> {
    pub temp_dir: &'a Path,
    pub max_photo_size_bytes: usize,
    pub allowed_extensions: &'a [String],
    pub allowed_content_types: &'a [String],
}

impl<'a> UploadLimits<'a> {
    pub fn from_config(config: &'a Config) -> Self {
        Self {
            temp_dir: config.temp_uploads_dir(),
            max_photo_size_bytes: config.max_photo_size_bytes(),
            allowed_extensions: config.allowed_photo_extensions(),
            allowed_content_types: config.allowed_photo_content_types(),
        }
    }
}

/// Decoded multipart submission.
#[derive(Debug)]
pub struct ParsedSubmission {
    pub fields: SubmissionFields,
    pub photo: Option<StagedAttachment>,
}

/// Read every part of the form.
///
/// On error nothing stays in the staging directory.
pub async fn extract_submission(
    mut multipart: Multipart,
    limits: UploadLimits<'_>,
) -> Result<ParsedSubmission, AppError> {
    let mut fields = SubmissionFields::new();
    let mut photo: Option<StagedAttachment> = None;

    match read_parts(&mut multipart, limits, &mut fields, &mut photo).await {
        Ok(()) => Ok(ParsedSubmission { fields, photo }),
        Err(e) => {
            if let Some(staged) = &photo {
                discard_staged(staged).await;
            }
            Err(e)
        }
    }
}

async fn read_parts(
    multipart: &mut Multipart,
    limits: UploadLimits<'_>,
    fields: &mut SubmissionFields,
    photo: &mut Option<StagedAttachment>,
) -> Result<(), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Failed to read multipart form"))?
    {
        let Some(name) = field
            .name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
        else {
            tracing::debug!(filename = ?field.file_name(), "Skipping part without a name");
            continue;
        };

        let Some(filename) = field.file_name().map(str::to_string) else {
            let value = field
                .text()
                .await
                .map_err(|e| multipart_error(e, &format!("Failed to read field '{}'", name)))?;
            fields.append(name, value);
            continue;
        };

        // An untouched file input arrives as a part with an empty filename.
        if name == PHOTO_FIELD && filename.is_empty() {
            continue;
        }

        if name != PHOTO_FIELD || photo.is_some() {
            tracing::warn!(field = %name, filename = %filename, "Unexpected file part");
            return Err(AppError::AttachmentRejected(UNEXPECTED_FIELD.to_string()));
        }

        let content_type = field
            .content_type()
            .unwrap_or(UNKNOWN_CONTENT_TYPE)
            .to_string();
        let extension = screen_photo(
            &filename,
            &content_type,
            limits.allowed_extensions,
            limits.allowed_content_types,
        )?;

        let path = staging_path(limits.temp_dir, &extension);
        let size = stream_to_file(field, &path, limits.max_photo_size_bytes).await?;

        tracing::debug!(
            path = %path.display(),
            filename = %filename,
            content_type = %content_type,
            size_bytes = size,
            "Photo staged"
        );

        *photo = Some(StagedAttachment {
            path,
            original_filename: filename,
            content_type,
            size,
        });
    }

    Ok(())
}

/// A body over the request cap surfaces as a 413 multipart error; it is reported like an
/// oversize photo.
fn multipart_error(err: MultipartError, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::debug!(error = %err, "Request body limit reached");
        AppError::AttachmentRejected(FILE_TOO_LARGE.to_string())
    } else {
        AppError::BadRequest(format!("{}: {}", context, err))
    }
}

/// `<temp>/<epoch_ms>-<random>.<ext>`
fn staging_path(temp_dir: &Path, extension: &str) -> PathBuf {
    temp_dir.join(format!(
        "{}-{}.{}",
        Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        extension
    ))
}

/// Copy the part body to `path`, enforcing `max_size`. Returns the byte count.
///
/// The partial file is removed on any failure.
async fn stream_to_file(
    mut field: Field<'_>,
    path: &Path,
    max_size: usize,
) -> Result<u64, AppError> {
    let mut file = fs::File::create(path).await.map_err(|e| {
        AppError::Internal(format!(
            "Failed to create staging file {}: {}",
            path.display(),
            e
        ))
    })?;

    let result = async {
        let mut written: usize = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, "Failed to read photo"))?
        {
            written += chunk.len();
            if written > max_size {
                return Err(AppError::AttachmentRejected(FILE_TOO_LARGE.to_string()));
            }
            file.write_all(&chunk)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to write staging file: {}", e)))?;
        }
        file.flush()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write staging file: {}", e)))?;
        Ok::<u64, AppError>(written as u64)
    }
    .await;

    if result.is_err() {
        drop(file);
        if let Err(e) = fs::remove_file(path).await {
            tracing::warn!(error = %e, path = %path.display(), "Failed to remove partial upload");
        }
    }

    result
}
