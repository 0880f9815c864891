//! Intake Core Library
//!
//! This crate provides the domain models, error types, configuration and the intake
//! validator shared by the storage and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, IntakeConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use validation::{validate_submission, IntakeRejection};
