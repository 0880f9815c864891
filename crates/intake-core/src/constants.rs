//! Field names and fixed file names of the intake form and its on-disk layout.

/// Form field holding the applicant's full name.
pub const FULL_NAME_FIELD: &str = "fullName";

/// Form field holding the contact phone.
pub const PHONE_FIELD: &str = "phone";

/// Multipart part carrying the photo attachment. Also the metadata key for the stored photo.
pub const PHOTO_FIELD: &str = "photo";

/// Metadata key for the server-assigned submission timestamp.
pub const SUBMITTED_AT_FIELD: &str = "submittedAt";

/// Metadata file written inside every application directory.
pub const METADATA_FILE_NAME: &str = "application.json";

/// Base name of the stored photo; the original extension is appended.
pub const PHOTO_BASE_NAME: &str = "photo";

/// Extension used when the uploaded photo's filename carries none.
pub const DEFAULT_PHOTO_EXTENSION: &str = ".jpg";
