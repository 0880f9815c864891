//! Intake validator.
//!
//! The only requirement on a submission is that the full name and the contact phone are
//! present and non-empty. Values are not trimmed and not checked for format or length.

use crate::constants::{FULL_NAME_FIELD, PHONE_FIELD};
use crate::models::{AcceptedSubmission, SubmissionFields};

/// Reason a submission was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IntakeRejection {
    #[error("missing required contact information")]
    MissingContactInformation,
}

/// Decide whether a submission is accepted.
pub fn validate_submission(fields: SubmissionFields) -> Result<AcceptedSubmission, IntakeRejection> {
    let present = |name: &str| fields.get(name).is_some_and(|value| !value.is_empty());

    if !present(FULL_NAME_FIELD) || !present(PHONE_FIELD) {
        return Err(IntakeRejection::MissingContactInformation);
    }

    Ok(AcceptedSubmission::new(fields))
}
