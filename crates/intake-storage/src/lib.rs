//! Intake Storage Library
//!
//! This crate persists accepted submissions. It defines the [`ApplicationStore`] trait and
//! the local filesystem implementation.
//!
//! # On-disk layout
//!
//! ```text
//! <applications-root>/<sanitized_name>_<epoch_ms>/
//!     application.json
//!     photo<ext>          (only when a photo was supplied)
//! ```
//!
//! Identifier derivation lives in the `keys` module so the layout stays in one place.

pub mod keys;
pub mod local;
pub mod staging;
pub mod traits;

// Re-export commonly used types
pub use local::LocalApplicationStore;
pub use staging::discard_staged;
pub use traits::{ApplicationStore, StorageError, StorageResult};
