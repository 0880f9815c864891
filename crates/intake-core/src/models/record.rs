use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use utoipa::ToSchema;

use super::SubmissionFields;
use crate::constants::{PHOTO_FIELD, SUBMITTED_AT_FIELD};

/// Contents of `application.json`.
///
/// Serializes every submitted field verbatim (a repeated name as an array), then `photo` (relative filename or `null`)
/// and `submittedAt`. Submitted fields that collide with those two keys are superseded.
#[derive(Debug, Clone)]
pub struct ApplicationRecord<'a> {
    pub fields: &'a SubmissionFields,
    pub photo: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl Serialize for ApplicationRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in self
            .fields
            .iter()
            .filter(|(name, _)| *name != PHOTO_FIELD && *name != SUBMITTED_AT_FIELD)
        {
            map.serialize_entry(name, &value)?;
        }
        map.serialize_entry(PHOTO_FIELD, &self.photo)?;
        map.serialize_entry(SUBMITTED_AT_FIELD, &format_submitted_at(self.submitted_at))?;
        map.end()
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T10:00:00.123Z`.
pub fn format_submitted_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Outcome of a successful persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Directory name, also returned to the client.
    pub application_id: String,
    /// Resolved directory path.
    pub path: PathBuf,
    /// Stored photo filename relative to `path`.
    pub photo: Option<String>,
}

/// Response body for a stored application (HTTP 201).
#[derive(Debug, Clone, serde::Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCreatedResponse {
    pub success: bool,
    pub message: String,
    pub application_id: String,
    pub path: String,
}

impl From<StoredRecord> for ApplicationCreatedResponse {
    fn from(record: StoredRecord) -> Self {
        Self {
            success: true,
            message: "Application saved successfully".to_string(),
            application_id: record.application_id,
            path: record.path.display().to_string(),
        }
    }
}
