//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use intake_core::models;

/// Returns the OpenAPI spec for the service.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Intake API",
        version = "0.1.0",
        description = "Application form intake. Each accepted submission is stored as a directory holding application.json and an optional photo."
    ),
    paths(handlers::application::submit_application),
    components(schemas(models::ApplicationCreatedResponse, error::ErrorResponse)),
    tags((name = "applications", description = "Application form submissions"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_documents_submission_endpoint() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/application"));
    }
}
