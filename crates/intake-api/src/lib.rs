//! Intake API Library
//!
//! This crate provides the HTTP handlers, multipart transport and application setup for the
//! application intake service.

mod api_doc;
mod handlers;
mod telemetry;
mod utils;
mod validation;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
