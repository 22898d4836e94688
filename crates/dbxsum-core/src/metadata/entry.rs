//! Convenience view derived from a metadata record.

use serde::Serialize;

use super::FileMetadata;

/// Flattened view of a [`FileMetadata`] with the fields callers usually want.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    /// Display path, falling back to the lower-cased path, then the name.
    pub path: String,
    pub is_dir: bool,
    /// Size in bytes; 0 for folders.
    pub bytes: u64,
    pub content_hash: Option<String>,
}

impl From<&FileMetadata> for FileEntry {
    fn from(meta: &FileMetadata) -> Self {
        let is_dir = match meta.tag.as_deref() {
            Some(tag) => tag == "folder",
            None => meta.size.is_none(),
        };
        let path = meta
            .path_display
            .clone()
            .or_else(|| meta.path_lower.clone())
            .unwrap_or_else(|| meta.name.clone());
        FileEntry {
            name: meta.name.clone(),
            path,
            is_dir,
            bytes: meta.size.unwrap_or(0),
            content_hash: meta.content_hash.clone(),
        }
    }
}
