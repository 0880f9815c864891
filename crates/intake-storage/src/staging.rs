//! Best-effort removal of staged uploads and partially written records.
//!
//! Failures here are logged and swallowed; callers always report the primary error.

use intake_core::models::StagedAttachment;
use std::path::Path;
use tokio::fs;

/// Delete a staged photo if it is still present.
pub async fn discard_staged(attachment: &StagedAttachment) {
    remove_file_best_effort(&attachment.path).await;
}

pub(crate) async fn remove_file_best_effort(path: &Path) {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return;
    }

    match fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed temporary file"),
        Err(e) => tracing::warn!(
            error = %e,
            path = %path.display(),
            "Failed to remove temporary file"
        ),
    }
}

/// Remove a directory only when nothing was written to it.
pub(crate) async fn remove_dir_if_empty(path: &Path) {
    match fs::read_dir(path).await {
        Ok(mut entries) => match entries.next_entry().await {
            Ok(None) => {}
            Ok(Some(_)) => {
                tracing::warn!(path = %path.display(), "Leaving non-empty application directory in place");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Failed to inspect application directory");
                return;
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Failed to inspect application directory");
            return;
        }
    }

    if let Err(e) = fs::remove_dir(path).await {
        tracing::warn!(
            error = %e,
            path = %path.display(),
            "Failed to remove partially created application directory"
        );
    }
}
