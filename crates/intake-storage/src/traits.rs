//! Storage abstraction trait
//!
//! This module defines the ApplicationStore trait that persisters implement.

use async_trait::async_trait;
use intake_core::models::{AcceptedSubmission, StagedAttachment, StoredRecord};
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Directory creation failed: {0}")]
    DirectoryCreation(String),

    #[error("Photo placement failed: {0}")]
    AttachmentPlacement(String),

    #[error("Metadata write failed: {0}")]
    MetadataWrite(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persists accepted submissions as application directories.
///
/// Implementations take ownership of the staged photo: on success it has been moved into
/// the application directory, on failure it has been deleted (best-effort).
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Store one accepted submission and its optional photo.
    async fn store(
        &self,
        submission: AcceptedSubmission,
        photo: Option<StagedAttachment>,
    ) -> StorageResult<StoredRecord>;

    /// Check that the applications root is usable.
    async fn check_health(&self) -> StorageResult<()>;

    /// Directory under which application directories are created.
    fn root(&self) -> &Path;
}
