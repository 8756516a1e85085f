//! Domain model for an in-flight SBOM file.

use bytes::Bytes;
use sbomstore_storage::FileContent;

/// One file to store, handed to [`crate::StorageAdministration`].
///
/// `size` must equal the exact number of bytes `content` yields; a mismatch is
/// a caller error surfaced at upload time. The content is single-use and is
/// consumed by the store call.
#[derive(Debug)]
pub struct SbomFile {
    pub filename: String,
    pub content_type: String,
    pub content: FileContent,
    pub size: u64,
}

impl SbomFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<FileContent>,
        size: u64,
    ) -> Self {
        SbomFile {
            filename: filename.into(),
            content_type: content_type.into(),
            content: content.into(),
            size,
        }
    }

    /// Build a file from bytes already in memory, deriving `size`.
    pub fn from_bytes(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        let bytes = bytes.into();
        let size = bytes.len() as u64;
        SbomFile {
            filename: filename.into(),
            content_type: content_type.into(),
            content: FileContent::Bytes(bytes),
            size,
        }
    }
}
