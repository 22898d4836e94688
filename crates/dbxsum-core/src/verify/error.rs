//! Verification failures surfaced to callers.

/// A local file does not match what the service reports for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },
    #[error("content hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },
    /// The metadata has no `content_hash` (folders, deleted entries).
    #[error("metadata for {name} carries no content hash")]
    MissingHash { name: String },
}
