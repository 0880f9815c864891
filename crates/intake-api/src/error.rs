//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Anything that converts into [`AppError`]
//! (including [`StorageError`] and multipart rejections) renders through the single
//! [`IntoResponse`] implementation below.

use axum::{
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_core::{AppError, ErrorMetadata, IntakeRejection, LogLevel};
use intake_storage::StorageError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
///
/// `expose_details` is set from the configured environment; internal details are only
/// rendered when it is true.
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    pub expose_details: bool,
}

impl HttpAppError {
    pub fn expose_details(mut self, expose: bool) -> Self {
        self.expose_details = expose;
        self
    }
}

impl From<AppError> for HttpAppError {
    fn from(error: AppError) -> Self {
        HttpAppError {
            error,
            expose_details: false,
        }
    }
}

impl From<IntakeRejection> for HttpAppError {
    fn from(rejection: IntakeRejection) -> Self {
        AppError::from(rejection).into()
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string()).into()
    }
}

/// Requests that are not `multipart/form-data` at all.
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text())).into()
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let detail = error.to_string();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %detail, error_type = error_type, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %detail, error_type = error_type, "Request rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %detail, error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let (details, error_type) = if self.expose_details {
            (
                Some(app_error.to_string()),
                Some(app_error.error_type().to_string()),
            )
        } else {
            (None, None)
        };

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            details,
            error_type,
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        });

        (status, body).into_response()
    }
}
