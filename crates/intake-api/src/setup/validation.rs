//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use intake_core::Config;

/// Validate critical configuration values
///
/// Hard errors come from [`Config::validate`]; settings that are legal but risky are
/// logged as warnings.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_development() {
        tracing::warn!("Development mode: error responses include internal details");
    }

    if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - set CORS_ORIGINS to restrict");
    }

    if !config.static_dir().is_dir() {
        tracing::warn!(
            static_dir = %config.static_dir().display(),
            "STATIC_DIR does not exist - the form page will not be served"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
