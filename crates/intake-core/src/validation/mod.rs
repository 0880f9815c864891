//! Validation modules

pub mod intake;

pub use intake::{validate_submission, IntakeRejection};
