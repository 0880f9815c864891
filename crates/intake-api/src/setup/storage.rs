//! Storage setup and initialization

use anyhow::Result;
use intake_core::Config;
use intake_storage::{ApplicationStore, LocalApplicationStore};
use std::sync::Arc;

/// Open the application store rooted at the configured applications directory.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn ApplicationStore>> {
    tracing::info!("Initializing application store...");
    let store = LocalApplicationStore::new(config.applications_dir())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize application store: {}", e))?;

    store
        .check_health()
        .await
        .map_err(|e| anyhow::anyhow!("Application store is not usable: {}", e))?;

    tracing::info!(
        root = %store.root().display(),
        "Application store initialized successfully"
    );

    Ok(Arc::new(store))
}
