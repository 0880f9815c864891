//! Application submission integration tests.
//!
//! Run with: `cargo test -p intake-api --test application_test`

mod helpers;

use helpers::{form, photo, setup_test_app, setup_test_app_in, APPLICATION_PATH};
use serde_json::Value;
use std::time::Duration;

fn assert_timestamp_suffix(application_id: &str, prefix: &str) {
    let suffix = application_id
        .strip_prefix(prefix)
        .unwrap_or_else(|| panic!("{} should start with {}", application_id, prefix));
    assert!(
        !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()),
        "unexpected timestamp suffix in {}",
        application_id
    );
}

#[tokio::test]
async fn test_submit_cyrillic_name_without_photo() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(form(&[("fullName", "Иван Петров"), ("phone", "+79990001122")]))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Application saved successfully");

    let application_id = body["applicationId"].as_str().unwrap();
    assert_timestamp_suffix(application_id, "иван_петров_");
    assert_eq!(
        body["path"].as_str().unwrap(),
        app.applications_dir.join(application_id).display().to_string()
    );

    let record = app.read_record(application_id);
    assert_eq!(record["fullName"], "Иван Петров");
    assert_eq!(record["phone"], "+79990001122");
    assert!(record["photo"].is_null());
    assert!(!record["submittedAt"].as_str().unwrap().is_empty());

    let files = std::fs::read_dir(app.applications_dir.join(application_id))
        .unwrap()
        .count();
    assert_eq!(files, 1);
}

#[tokio::test]
async fn test_submit_keeps_every_field_verbatim() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(form(&[
            ("fullName", "Anna Smith"),
            ("phone", "123"),
            ("university", "  MIT  "),
            ("motivation", "line one\nline two"),
            ("empty", ""),
        ]))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    let application_id = body["applicationId"].as_str().unwrap();
    assert_timestamp_suffix(application_id, "anna_smith_");

    let record = app.read_record(application_id);
    assert_eq!(record["university"], "  MIT  ");
    assert_eq!(record["motivation"], "line one\nline two");
    assert_eq!(record["empty"], "");
}

#[tokio::test]
async fn test_repeated_checkbox_field_keeps_every_value() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(form(&[
            ("fullName", "Anna"),
            ("skills", "rust"),
            ("phone", "123"),
            ("skills", "go"),
        ]))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    let record = app.read_record(body["applicationId"].as_str().unwrap());
    assert_eq!(record["skills"], serde_json::json!(["rust", "go"]));
    assert_eq!(record["phone"], "123");
}

#[tokio::test]
async fn test_parts_without_a_name_are_skipped() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(form(&[("fullName", "Anna"), ("", "stray"), ("phone", "123")]))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    let record = app.read_record(body["applicationId"].as_str().unwrap());
    assert!(record.get("").is_none());
    assert_eq!(record.as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn test_submit_with_photo_moves_it_into_the_application() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(
            form(&[("fullName", "Anna"), ("phone", "123")])
                .add_part("photo", photo("Portrait.JPG", "image/jpeg", 2048)),
        )
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    let application_id = body["applicationId"].as_str().unwrap();

    let record = app.read_record(application_id);
    assert_eq!(record["photo"], "photo.jpg");

    let stored = std::fs::read(app.applications_dir.join(application_id).join("photo.jpg")).unwrap();
    assert_eq!(stored.len(), 2048);
    assert!(app.staged_files().is_empty());
}

#[tokio::test]
async fn test_empty_photo_input_is_ignored() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(
            form(&[("fullName", "Anna"), ("phone", "123")])
                .add_part("photo", photo("", "application/octet-stream", 0)),
        )
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    let record = app.read_record(body["applicationId"].as_str().unwrap());
    assert!(record["photo"].is_null());
}

#[tokio::test]
async fn test_missing_contact_information_is_rejected() {
    let app = setup_test_app().await;

    for fields in [
        vec![("phone", "123")],
        vec![("fullName", "Anna")],
        vec![("university", "MIT")],
        vec![("fullName", ""), ("phone", "123")],
        vec![("fullName", "Anna"), ("phone", "")],
    ] {
        let response = app
            .client()
            .post(APPLICATION_PATH)
            .multipart(form(&fields))
            .await;

        assert_eq!(response.status_code(), 400, "fields: {:?}", fields);
        let body: Value = response.json();
        assert_eq!(body["error"], "Full name and contact phone are required");
        assert_eq!(body["code"], "MISSING_CONTACT_INFORMATION");
    }

    assert!(app.application_dirs().is_empty());
}

#[tokio::test]
async fn test_rejected_submission_discards_staged_photo() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(
            form(&[("phone", "123")]).add_part("photo", photo("me.png", "image/png", 512)),
        )
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(app.application_dirs().is_empty());
    assert!(app.staged_files().is_empty());
}

#[tokio::test]
async fn test_whitespace_name_counts_as_present() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(form(&[("fullName", "   "), ("phone", "123")]))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_timestamp_suffix(body["applicationId"].as_str().unwrap(), "____");
}

#[tokio::test]
async fn test_photo_with_disallowed_type_is_rejected() {
    let app = setup_test_app().await;

    for (file_name, mime_type) in [
        ("resume.pdf", "application/pdf"),
        ("resume.pdf", "image/jpeg"),
        ("photo.jpg", "text/plain"),
        ("photo.webp", "image/webp"),
    ] {
        let response = app
            .client()
            .post(APPLICATION_PATH)
            .multipart(
                form(&[("fullName", "Anna"), ("phone", "123")])
                    .add_part("photo", photo(file_name, mime_type, 128)),
            )
            .await;

        assert_eq!(response.status_code(), 400, "{} as {}", file_name, mime_type);
        let body: Value = response.json();
        assert_eq!(body["error"], "Only images are allowed (jpeg, jpg, png, gif)");
        assert_eq!(body["code"], "ATTACHMENT_REJECTED");
    }

    assert!(app.application_dirs().is_empty());
    assert!(app.staged_files().is_empty());
}

#[tokio::test]
async fn test_oversized_photo_is_rejected_and_removed() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(form(&[("fullName", "Anna"), ("phone", "123")]).add_part(
            "photo",
            photo("big.gif", "image/gif", helpers::TEST_MAX_PHOTO_BYTES + 1),
        ))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "File upload error: File too large");
    assert!(app.application_dirs().is_empty());
    assert!(app.staged_files().is_empty());
}

#[tokio::test]
async fn test_photo_over_request_limit_is_rejected_as_too_large() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(form(&[("fullName", "Anna"), ("phone", "123")]).add_part(
            "photo",
            photo("huge.png", "image/png", helpers::TEST_MAX_PHOTO_BYTES * 5),
        ))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "ATTACHMENT_REJECTED");
    assert_eq!(body["error"], "File upload error: File too large");
    assert!(app.application_dirs().is_empty());
    assert!(app.staged_files().is_empty());
}

#[tokio::test]
async fn test_text_field_over_request_limit_is_rejected_as_too_large() {
    let app = setup_test_app().await;
    let essay = "a".repeat(helpers::TEST_MAX_PHOTO_BYTES * 5);

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(form(&[("fullName", "Anna"), ("phone", "123"), ("essay", &essay)]))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "ATTACHMENT_REJECTED");
    assert_eq!(body["error"], "File upload error: File too large");
    assert!(app.application_dirs().is_empty());
}

#[tokio::test]
async fn test_photo_at_size_limit_is_accepted() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(form(&[("fullName", "Anna"), ("phone", "123")]).add_part(
            "photo",
            photo("exact.png", "image/png", helpers::TEST_MAX_PHOTO_BYTES),
        ))
        .await;

    assert_eq!(response.status_code(), 201);
}

#[tokio::test]
async fn test_unexpected_file_parts_are_rejected() {
    let app = setup_test_app().await;

    let other_field = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(
            form(&[("fullName", "Anna"), ("phone", "123")])
                .add_part("resume", photo("cv.png", "image/png", 64)),
        )
        .await;
    assert_eq!(other_field.status_code(), 400);
    let body: Value = other_field.json();
    assert_eq!(body["error"], "File upload error: Unexpected field");

    let second_photo = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(
            form(&[("fullName", "Anna"), ("phone", "123")])
                .add_part("photo", photo("a.png", "image/png", 64))
                .add_part("photo", photo("b.png", "image/png", 64)),
        )
        .await;
    assert_eq!(second_photo.status_code(), 400);

    assert!(app.application_dirs().is_empty());
    assert!(app.staged_files().is_empty());
}

#[tokio::test]
async fn test_same_name_submissions_do_not_overwrite() {
    let app = setup_test_app().await;

    let mut ids = Vec::new();
    for phone in ["111", "222"] {
        let response = app
            .client()
            .post(APPLICATION_PATH)
            .multipart(form(&[("fullName", "Anna"), ("phone", phone)]))
            .await;
        assert_eq!(response.status_code(), 201);
        let body: Value = response.json();
        ids.push(body["applicationId"].as_str().unwrap().to_string());
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert_ne!(ids[0], ids[1]);
    assert_eq!(app.application_dirs().len(), 2);
    assert_eq!(app.read_record(&ids[0])["phone"], "111");
    assert_eq!(app.read_record(&ids[1])["phone"], "222");
}

#[tokio::test]
async fn test_storage_failure_returns_generic_error() {
    let app = setup_test_app().await;
    std::fs::remove_dir(&app.applications_dir).unwrap();
    std::fs::write(&app.applications_dir, b"not a directory").unwrap();

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(
            form(&[("fullName", "Anna"), ("phone", "123")])
                .add_part("photo", photo("me.png", "image/png", 256)),
        )
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert!(body.get("details").is_none());
    assert!(app.staged_files().is_empty());
}

#[tokio::test]
async fn test_storage_failure_details_in_development() {
    let app = setup_test_app_in("development").await;
    std::fs::remove_dir(&app.applications_dir).unwrap();
    std::fs::write(&app.applications_dir, b"not a directory").unwrap();

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .multipart(form(&[("fullName", "Anna"), ("phone", "123")]))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].as_str().unwrap().contains("Failed to create directory"));
    assert_eq!(body["error_type"], "Storage");
}

#[tokio::test]
async fn test_non_multipart_body_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(APPLICATION_PATH)
        .json(&serde_json::json!({ "fullName": "Anna", "phone": "123" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(app.application_dirs().is_empty());
}

#[tokio::test]
async fn test_health_and_liveness() {
    let app = setup_test_app().await;

    let health = app.client().get("/health").await;
    assert_eq!(health.status_code(), 200);
    let body: Value = health.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "healthy");

    let live = app.client().get("/live").await;
    assert_eq!(live.status_code(), 200);
    let body: Value = live.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_health_reports_unavailable_storage() {
    let app = setup_test_app().await;
    std::fs::remove_dir(&app.applications_dir).unwrap();

    let health = app.client().get("/health").await;
    assert_eq!(health.status_code(), 503);
    let body: Value = health.json();
    assert_eq!(body["status"], "unhealthy");
    assert!(body["storage"].as_str().unwrap().starts_with("unavailable: "));
}

#[tokio::test]
async fn test_static_form_page_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("application"));
}

#[tokio::test]
async fn test_openapi_document_lists_endpoint() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["paths"]["/api/application"]["post"].is_object());
}
