use std::path::PathBuf;

/// Photo attachment already written in full to the staging directory.
///
/// The transport layer creates it; the persister either moves the file into the
/// application directory or deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAttachment {
    /// Location of the staged file.
    pub path: PathBuf,
    /// Filename as declared by the client.
    pub original_filename: String,
    /// MIME type as declared by the client.
    pub content_type: String,
    /// Number of bytes written.
    pub size: u64,
}
