use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use intake_core::models::{ApplicationCreatedResponse, StoredRecord};
use intake_core::validate_submission;
use intake_storage::discard_staged;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_submission, UploadLimits};

/// Submit an application
///
/// Accepts a `multipart/form-data` form with any number of text fields and an optional
/// `photo` image. `fullName` and `phone` must be present and non-empty.
///
/// # Returns
/// `ApplicationCreatedResponse` with the application id and directory (HTTP 201 Created)
///
/// # Errors
/// - `AppError::MissingContactInformation` - `fullName` or `phone` missing or empty
/// - `AppError::AttachmentRejected` - photo has the wrong type, is too large, or is unexpected
/// - `AppError::BadRequest` - body is not a readable multipart form
/// - `AppError::Storage` - the application directory or its files could not be written
#[utoipa::path(
    post,
    path = "/api/application",
    tag = "applications",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Application saved", body = ApplicationCreatedResponse),
        (status = 400, description = "Missing contact information or rejected photo", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "submit_application"))]
pub async fn submit_application(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ApplicationCreatedResponse>), HttpAppError> {
    let expose_details = state.config.is_development();

    let record = accept_application(&state, multipart)
        .await
        .map_err(|e| e.expose_details(expose_details))?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

async fn accept_application(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StoredRecord, HttpAppError> {
    let parsed = extract_submission(multipart?, UploadLimits::from_config(&state.config)).await?;

    let submission = match validate_submission(parsed.fields) {
        Ok(submission) => submission,
        Err(rejection) => {
            if let Some(staged) = &parsed.photo {
                discard_staged(staged).await;
            }
            return Err(rejection.into());
        }
    };

    let record = state.store.store(submission, parsed.photo).await?;

    tracing::info!(
        application_id = %record.application_id,
        has_photo = record.photo.is_some(),
        "Application accepted"
    );

    Ok(record)
}
