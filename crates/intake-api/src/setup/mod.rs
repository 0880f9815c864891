//! Application setup and initialization
//!
//! Everything between reading the configuration and serving the first request.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use intake_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(mut config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    config
        .prepare_directories()
        .context("Failed to prepare data directories")?;

    tracing::info!(
        environment = %config.environment(),
        applications_dir = %config.applications_dir().display(),
        temp_uploads_dir = %config.temp_uploads_dir().display(),
        static_dir = %config.static_dir().display(),
        "Configuration loaded and validated successfully"
    );

    let store = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(config, store));

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
