//! Configuration module
//!
//! Configuration is read from the environment once at startup (a `.env` file is honoured)
//! and then passed explicitly to the storage layer and request handlers. Directory paths are
//! resolved to absolute paths by [`Config::prepare_directories`] before the server starts.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const SERVER_PORT: u16 = 3000;
const MAX_PHOTO_SIZE_MB: usize = 5;
const MAX_REQUEST_BODY_MB: usize = 10;
const APPLICATIONS_DIR: &str = "internship_applications";
const TEMP_UPLOADS_DIR: &str = "temp_uploads";
const STATIC_DIR: &str = "public";
const PHOTO_EXTENSIONS: &str = "jpeg,jpg,png,gif";
const PHOTO_CONTENT_TYPES: &str = "image/jpeg,image/jpg,image/png,image/gif";

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Intake service settings
#[derive(Clone, Debug)]
pub struct IntakeConfig {
    pub base: BaseConfig,
    // Storage layout
    pub applications_dir: PathBuf,
    pub temp_uploads_dir: PathBuf,
    pub static_dir: PathBuf,
    // Photo upload limits
    pub max_photo_size_bytes: usize,
    pub allowed_photo_extensions: Vec<String>,
    pub allowed_photo_content_types: Vec<String>,
    pub max_request_body_bytes: usize,
    // Sandbox
    pub landlock_enabled: bool,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<IntakeConfig>);

impl Config {
    pub fn new(config: IntakeConfig) -> Self {
        Config(Box::new(config))
    }

    fn as_intake(&self) -> &IntakeConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = IntakeConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_intake().validate()
    }

    /// Create the applications and staging directories and pin them to absolute paths.
    pub fn prepare_directories(&mut self) -> Result<(), anyhow::Error> {
        self.0.applications_dir = ensure_directory(&self.0.applications_dir)?;
        self.0.temp_uploads_dir = ensure_directory(&self.0.temp_uploads_dir)?;
        Ok(())
    }

    /// Check if the application is running in development mode
    pub fn is_development(&self) -> bool {
        let environment = self.environment().to_lowercase();
        environment == "development" || environment == "dev"
    }

    pub fn server_port(&self) -> u16 {
        self.as_intake().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_intake().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_intake().base.environment
    }

    pub fn applications_dir(&self) -> &Path {
        &self.as_intake().applications_dir
    }

    pub fn temp_uploads_dir(&self) -> &Path {
        &self.as_intake().temp_uploads_dir
    }

    pub fn static_dir(&self) -> &Path {
        &self.as_intake().static_dir
    }

    pub fn max_photo_size_bytes(&self) -> usize {
        self.as_intake().max_photo_size_bytes
    }

    pub fn allowed_photo_extensions(&self) -> &[String] {
        &self.as_intake().allowed_photo_extensions
    }

    pub fn allowed_photo_content_types(&self) -> &[String] {
        &self.as_intake().allowed_photo_content_types
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.as_intake().max_request_body_bytes
    }

    pub fn landlock_enabled(&self) -> bool {
        self.as_intake().landlock_enabled
    }
}

impl IntakeConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "production".to_string());

        let cors_origins = parse_list(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()), false);

        let max_photo_size_mb = env::var("MAX_PHOTO_SIZE_MB")
            .unwrap_or_else(|_| MAX_PHOTO_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_PHOTO_SIZE_MB);

        let max_request_body_mb = env::var("MAX_REQUEST_BODY_MB")
            .unwrap_or_else(|_| MAX_REQUEST_BODY_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_REQUEST_BODY_MB);

        let allowed_photo_extensions = parse_list(
            &env::var("ALLOWED_PHOTO_EXTENSIONS").unwrap_or_else(|_| PHOTO_EXTENSIONS.to_string()),
            true,
        );

        let allowed_photo_content_types = parse_list(
            &env::var("ALLOWED_PHOTO_CONTENT_TYPES")
                .unwrap_or_else(|_| PHOTO_CONTENT_TYPES.to_string()),
            true,
        );

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        };

        Ok(IntakeConfig {
            base,
            applications_dir: PathBuf::from(
                env::var("APPLICATIONS_DIR").unwrap_or_else(|_| APPLICATIONS_DIR.to_string()),
            ),
            temp_uploads_dir: PathBuf::from(
                env::var("TEMP_UPLOADS_DIR").unwrap_or_else(|_| TEMP_UPLOADS_DIR.to_string()),
            ),
            static_dir: PathBuf::from(
                env::var("STATIC_DIR").unwrap_or_else(|_| STATIC_DIR.to_string()),
            ),
            max_photo_size_bytes: megabytes("MAX_PHOTO_SIZE_MB", max_photo_size_mb)?,
            allowed_photo_extensions,
            allowed_photo_content_types,
            max_request_body_bytes: megabytes("MAX_REQUEST_BODY_MB", max_request_body_mb)?,
            landlock_enabled: env::var("LANDLOCK_ENABLED")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_photo_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_PHOTO_SIZE_MB cannot be 0"));
        }

        if self.max_request_body_bytes < self.max_photo_size_bytes {
            return Err(anyhow::anyhow!(
                "MAX_REQUEST_BODY_MB must be at least MAX_PHOTO_SIZE_MB, otherwise oversized photos are cut off before they can be rejected"
            ));
        }

        if self.allowed_photo_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_PHOTO_EXTENSIONS cannot be empty"));
        }

        if self.allowed_photo_content_types.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_PHOTO_CONTENT_TYPES cannot be empty"));
        }

        if self.applications_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("APPLICATIONS_DIR cannot be empty"));
        }

        if self.temp_uploads_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("TEMP_UPLOADS_DIR cannot be empty"));
        }

        Ok(())
    }
}

/// Split a comma separated value, dropping empty entries.
fn parse_list(value: &str, lowercase: bool) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| if lowercase { s.to_lowercase() } else { s.to_string() })
        .collect()
}

/// Convert a size setting from MiB to bytes.
fn megabytes(var: &str, mb: usize) -> Result<usize, anyhow::Error> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("{} is too large: {}", var, mb))
}

fn ensure_directory(path: &Path) -> Result<PathBuf, anyhow::Error> {
    fs::create_dir_all(path).map_err(|e| {
        anyhow::anyhow!("Failed to create directory {}: {}", path.display(), e)
    })?;
    fs::canonicalize(path)
        .map_err(|e| anyhow::anyhow!("Failed to resolve directory {}: {}", path.display(), e))
}
