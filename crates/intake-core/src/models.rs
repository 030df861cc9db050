use serde::{Deserialize, Serialize};

/// Metadata for one file persisted by an upload call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Name as declared by the client, untouched.
    pub original_file_name: String,
    /// Name actually used inside the target directory.
    pub new_file_name: String,
    /// Bytes written to disk.
    pub file_size_bytes: u64,
}
