//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p intake-api --test application_test`.
//! Every app gets its own temporary applications, staging and static directories.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use intake_api::setup::routes;
use intake_api::state::AppState;
use intake_core::{BaseConfig, Config, IntakeConfig};
use intake_storage::LocalApplicationStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Submission endpoint.
pub const APPLICATION_PATH: &str = routes::APPLICATION_PATH;

/// Photo size cap used by test apps.
pub const TEST_MAX_PHOTO_BYTES: usize = 64 * 1024;

/// Test application: server and owned temporary directories.
pub struct TestApp {
    pub server: TestServer,
    pub applications_dir: PathBuf,
    pub temp_uploads_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Names of the application directories created so far.
    pub fn application_dirs(&self) -> Vec<String> {
        list_dir(&self.applications_dir)
    }

    /// Files left behind in the staging directory.
    pub fn staged_files(&self) -> Vec<String> {
        list_dir(&self.temp_uploads_dir)
    }

    pub fn read_record(&self, application_id: &str) -> serde_json::Value {
        let path = self
            .applications_dir
            .join(application_id)
            .join("application.json");
        let content = std::fs::read_to_string(&path).expect("application.json should exist");
        serde_json::from_str(&content).expect("application.json should be valid JSON")
    }
}

fn list_dir(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(path)
        .expect("directory should be readable")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Setup test app in production mode (no error details).
pub async fn setup_test_app() -> TestApp {
    setup_test_app_in("production").await
}

/// Setup test app with an explicit environment name.
pub async fn setup_test_app_in(environment: &str) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let static_dir = temp_dir.path().join("public");
    std::fs::create_dir_all(&static_dir).expect("Failed to create static dir");
    std::fs::write(static_dir.join("index.html"), "<form id=\"application\"></form>")
        .expect("Failed to write index.html");

    let mut config = Config::new(IntakeConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: environment.to_string(),
        },
        applications_dir: temp_dir.path().join("internship_applications"),
        temp_uploads_dir: temp_dir.path().join("temp_uploads"),
        static_dir,
        max_photo_size_bytes: TEST_MAX_PHOTO_BYTES,
        allowed_photo_extensions: ["jpeg", "jpg", "png", "gif"].map(String::from).to_vec(),
        allowed_photo_content_types: ["image/jpeg", "image/jpg", "image/png", "image/gif"]
            .map(String::from)
            .to_vec(),
        max_request_body_bytes: 4 * TEST_MAX_PHOTO_BYTES,
        landlock_enabled: false,
    });
    config.validate().expect("Test config should be valid");
    config
        .prepare_directories()
        .expect("Failed to prepare directories");

    let store = LocalApplicationStore::new(config.applications_dir())
        .await
        .expect("Failed to create store");

    let applications_dir = config.applications_dir().to_path_buf();
    let temp_uploads_dir = config.temp_uploads_dir().to_path_buf();

    let state = Arc::new(AppState::new(config, Arc::new(store)));
    let app = routes::setup_routes(&state.config, state.clone()).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        applications_dir,
        temp_uploads_dir,
        _temp_dir: temp_dir,
    }
}

/// Form with the given text fields.
pub fn form(fields: &[(&str, &str)]) -> MultipartForm {
    fields
        .iter()
        .fold(MultipartForm::new(), |form, (name, value)| {
            form.add_text(name.to_string(), value.to_string())
        })
}

/// Photo part with the given filename, MIME type and size.
pub fn photo(file_name: &str, mime_type: &str, size: usize) -> Part {
    Part::bytes(vec![0xFFu8; size])
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string())
}
