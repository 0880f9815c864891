use crate::keys::{application_id, photo_file_name};
use crate::staging::{discard_staged, remove_dir_if_empty, remove_file_best_effort};
use crate::traits::{ApplicationStore, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::Utc;
use intake_core::constants::METADATA_FILE_NAME;
use intake_core::models::{AcceptedSubmission, ApplicationRecord, StagedAttachment, StoredRecord};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem application store
///
/// Photo placement is strict: if the staged photo cannot be moved into the application
/// directory the whole submission fails, the staged file and the empty directory are
/// removed, and no metadata is written. The metadata's `photo` field therefore always
/// matches the directory contents.
#[derive(Clone, Debug)]
pub struct LocalApplicationStore {
    applications_root: PathBuf,
}

impl LocalApplicationStore {
    /// Create a new LocalApplicationStore
    ///
    /// # Arguments
    /// * `applications_root` - Directory holding one sub-directory per application
    ///   (created if missing and resolved to an absolute path)
    pub async fn new(applications_root: impl Into<PathBuf>) -> StorageResult<Self> {
        let applications_root = applications_root.into();

        fs::create_dir_all(&applications_root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create applications directory {}: {}",
                applications_root.display(),
                e
            ))
        })?;

        let applications_root = fs::canonicalize(&applications_root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to resolve applications directory {}: {}",
                applications_root.display(),
                e
            ))
        })?;

        Ok(LocalApplicationStore { applications_root })
    }

    /// Move the staged photo into `dir`, returning the stored filename.
    async fn place_photo(&self, staged: &StagedAttachment, dir: &Path) -> StorageResult<String> {
        let file_name = photo_file_name(&staged.original_filename);
        let target = dir.join(&file_name);

        fs::rename(&staged.path, &target).await.map_err(|e| {
            StorageError::AttachmentPlacement(format!(
                "Failed to move {} to {}: {}",
                staged.path.display(),
                target.display(),
                e
            ))
        })?;

        tracing::debug!(
            from = %staged.path.display(),
            to = %target.display(),
            size_bytes = staged.size,
            "Photo moved into application directory"
        );

        Ok(file_name)
    }

    async fn write_metadata(&self, dir: &Path, record: &ApplicationRecord<'_>) -> StorageResult<()> {
        let path = dir.join(METADATA_FILE_NAME);
        let json = serde_json::to_string_pretty(record).map_err(|e| {
            StorageError::MetadataWrite(format!("Failed to serialize application record: {}", e))
        })?;

        fs::write(&path, json).await.map_err(|e| {
            StorageError::MetadataWrite(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl ApplicationStore for LocalApplicationStore {
    async fn store(
        &self,
        submission: AcceptedSubmission,
        photo: Option<StagedAttachment>,
    ) -> StorageResult<StoredRecord> {
        let start = std::time::Instant::now();
        let application_id = application_id(submission.full_name(), Utc::now().timestamp_millis());
        let dir = self.applications_root.join(&application_id);

        if let Err(e) = fs::create_dir_all(&dir).await {
            if let Some(staged) = &photo {
                discard_staged(staged).await;
            }
            return Err(StorageError::DirectoryCreation(format!(
                "Failed to create directory {}: {}",
                dir.display(),
                e
            )));
        }

        let photo = match photo {
            Some(staged) => match self.place_photo(&staged, &dir).await {
                Ok(file_name) => Some(file_name),
                Err(e) => {
                    discard_staged(&staged).await;
                    remove_dir_if_empty(&dir).await;
                    return Err(e);
                }
            },
            None => None,
        };

        let record = ApplicationRecord {
            fields: submission.fields(),
            photo: photo.clone(),
            submitted_at: Utc::now(),
        };

        if let Err(e) = self.write_metadata(&dir, &record).await {
            if let Some(file_name) = &photo {
                remove_file_best_effort(&dir.join(file_name)).await;
            }
            remove_dir_if_empty(&dir).await;
            return Err(e);
        }

        tracing::info!(
            application_id = %application_id,
            path = %dir.display(),
            photo = ?photo,
            fields = submission.fields().len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Application stored"
        );

        Ok(StoredRecord {
            application_id,
            path: dir,
            photo,
        })
    }

    async fn check_health(&self) -> StorageResult<()> {
        let meta = fs::metadata(&self.applications_root).await?;
        if !meta.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "{} is not a directory",
                self.applications_root.display()
            )));
        }
        if meta.permissions().readonly() {
            return Err(StorageError::ConfigError(format!(
                "{} is read-only",
                self.applications_root.display()
            )));
        }
        Ok(())
    }

    fn root(&self) -> &Path {
        &self.applications_root
    }
}
