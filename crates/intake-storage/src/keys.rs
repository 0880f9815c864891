//! Application identifiers and stored file names.
//!
//! Identifier format: `<sanitized full name>_<epoch milliseconds>`. The identifier is also the
//! directory name, so two submissions with the same sanitized name in the same millisecond
//! share a directory.

use intake_core::constants::{DEFAULT_PHOTO_EXTENSION, PHOTO_BASE_NAME};

/// Keep ASCII letters, Cyrillic `А..я` and ASCII digits; everything else becomes `_`.
///
/// A character outside the Basic Multilingual Plane becomes two underscores, one per
/// UTF-16 code unit. The result is lowercased.
pub fn sanitize_name(full_name: &str) -> String {
    let mut sanitized = String::with_capacity(full_name.len());
    for c in full_name.chars() {
        if is_name_char(c) {
            sanitized.push(c);
        } else {
            for _ in 0..c.len_utf16() {
                sanitized.push('_');
            }
        }
    }
    sanitized.to_lowercase()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{0410}'..='\u{044F}').contains(&c)
}

/// Directory name and client-facing id for a submission made at `epoch_ms`.
pub fn application_id(full_name: &str, epoch_ms: i64) -> String {
    format!("{}_{}", sanitize_name(full_name), epoch_ms)
}

/// Lowercased extension of the declared filename, without the dot.
///
/// Only the last path segment counts, and a leading dot (`.bashrc`) is not an extension.
pub fn declared_extension(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match base.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < base.len() => Some(base[idx + 1..].to_lowercase()),
        _ => None,
    }
}

/// Extension (with the dot) of the stored photo, `.jpg` when the declared name has none.
pub fn photo_extension(original_filename: &str) -> String {
    declared_extension(original_filename)
        .map(|ext| format!(".{}", ext))
        .unwrap_or_else(|| DEFAULT_PHOTO_EXTENSION.to_string())
}

/// Stored photo filename, e.g. `photo.png`.
pub fn photo_file_name(original_filename: &str) -> String {
    format!("{}{}", PHOTO_BASE_NAME, photo_extension(original_filename))
}
