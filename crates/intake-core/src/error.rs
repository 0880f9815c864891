//! Error types module
//!
//! All request-level failures are unified under [`AppError`]. Each variant describes how it
//! is presented over HTTP through [`ErrorMetadata`]; the API crate renders it.

use crate::validation::IntakeRejection;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected uploads
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing contact information: {0}")]
    MissingContactInformation(#[from] IntakeRejection),

    #[error("Attachment rejected: {0}")]
    AttachmentRejected(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AppError::MissingContactInformation(_) => (
            400,
            "MISSING_CONTACT_INFORMATION",
            false,
            Some("Fill in the full name and contact phone and submit again"),
            LogLevel::Debug,
        ),
        AppError::AttachmentRejected(_) => (
            400,
            "ATTACHMENT_REJECTED",
            false,
            Some("Attach a JPEG, PNG or GIF image within the size limit"),
            LogLevel::Warn,
        ),
        AppError::BadRequest(_) => (
            400,
            "BAD_REQUEST",
            false,
            Some("Check request format and parameters"),
            LogLevel::Debug,
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingContactInformation(_) => {
                "Full name and contact phone are required".to_string()
            }
            AppError::AttachmentRejected(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Storage(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }
}

impl AppError {
    /// Variant name, used as `error_type` in development responses and logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingContactInformation(_) => "MissingContactInformation",
            AppError::AttachmentRejected(_) => "AttachmentRejected",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Storage(_) => "Storage",
            AppError::Internal(_) => "Internal",
        }
    }
}
