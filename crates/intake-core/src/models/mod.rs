//! Data models for the intake pipeline
//!
//! A submission flows through these types in order: [`SubmissionFields`] as parsed from the
//! request, [`AcceptedSubmission`] once validated, [`ApplicationRecord`] as written to disk,
//! and [`StoredRecord`] as reported back to the caller.

mod attachment;
mod record;
mod submission;

pub use attachment::*;
pub use record::*;
pub use submission::*;
