//! Typed file metadata returned by the storage service.
//!
//! Raw JSON is parsed into [`FileMetadata`]; convenience fields live on
//! [`FileEntry`], which is derived from a record and never written back.

mod entry;

pub use entry::FileEntry;

use serde::{Deserialize, Serialize};

/// File or folder metadata as returned by `files/get_metadata`, upload
/// commits, and the `Dropbox-API-Result` header of downloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// `file`, `folder` or `deleted`. Absent on download/upload results.
    #[serde(rename = ".tag", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_lower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Hex digest produced by [`crate::content_hash`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_modified: Option<String>,
}

/// Errors mapping a JSON body to [`FileMetadata`].
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The service answered with an error object instead of metadata.
    #[error("API error: {summary}")]
    Api { summary: String },
    #[error("invalid metadata JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error_summary: String,
}

/// Parse a metadata JSON document, mapping API error bodies to [`MetadataError::Api`].
pub fn parse_metadata(json: &str) -> Result<FileMetadata, MetadataError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.get("error_summary").is_some() {
        let body: ApiErrorBody = serde_json::from_value(value)?;
        return Err(MetadataError::Api {
            summary: body.error_summary,
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Extract an error summary from a non-2xx response body, if it carries one.
pub fn api_error_summary(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error_summary)
}
