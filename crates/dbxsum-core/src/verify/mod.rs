//! Integrity checks against service-reported sizes and content hashes.
//!
//! The hasher only produces digests; comparing them against what the
//! service stored happens here.

mod error;

pub use error::VerifyError;

use anyhow::{Context, Result};
use std::path::Path;

use crate::content_hash;
use crate::metadata::FileMetadata;

/// Compares two hex digests, ignoring case and surrounding whitespace.
pub fn check_digest(expected: &str, actual: &str) -> Result<(), VerifyError> {
    let expected = expected.trim();
    if expected.eq_ignore_ascii_case(actual.trim()) {
        Ok(())
    } else {
        Err(VerifyError::HashMismatch {
            expected: expected.to_ascii_lowercase(),
            actual: actual.trim().to_ascii_lowercase(),
        })
    }
}

/// Compares a byte count against the reported size.
pub fn check_size(expected: u64, actual: u64) -> Result<(), VerifyError> {
    if expected == actual {
        Ok(())
    } else {
        Err(VerifyError::SizeMismatch { expected, actual })
    }
}

/// Hashes `path` and compares against `expected`. Returns the computed digest.
///
/// I/O failures come back as plain errors; a mismatch is a [`VerifyError`]
/// inside the returned `anyhow::Error`.
pub fn verify_path(path: &Path, expected: &str, read_chunk_size: usize) -> Result<String> {
    let actual = content_hash::hash_path(path, read_chunk_size)?;
    if let Err(e) = check_digest(expected, &actual) {
        tracing::warn!(path = %path.display(), "{}", e);
        return Err(e.into());
    }
    Ok(actual)
}

/// Verifies `path` against a metadata record: size first, then content hash.
pub fn verify_against_metadata(
    path: &Path,
    meta: &FileMetadata,
    read_chunk_size: usize,
) -> Result<String> {
    let expected_hash = meta
        .content_hash
        .as_deref()
        .ok_or_else(|| VerifyError::MissingHash {
            name: meta.name.clone(),
        })?;
    if let Some(expected_size) = meta.size {
        let actual = std::fs::metadata(path)
            .with_context(|| format!("stat {}", path.display()))?
            .len();
        if let Err(e) = check_size(expected_size, actual) {
            tracing::warn!(path = %path.display(), "{}", e);
            return Err(e.into());
        }
    }
    verify_path(path, expected_hash, read_chunk_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_with(content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f.flush().unwrap();
        f
    }

    fn meta_for(content: &[u8]) -> FileMetadata {
        FileMetadata {
            tag: Some("file".into()),
            name: "x.bin".into(),
            id: None,
            path_lower: Some("/x.bin".into()),
            path_display: Some("/x.bin".into()),
            rev: None,
            size: Some(content.len() as u64),
            content_hash: Some(content_hash::hash_bytes(content)),
            client_modified: None,
            server_modified: None,
        }
    }

    #[test]
    fn digest_comparison_ignores_case() {
        assert!(check_digest("ABCDEF", "abcdef").is_ok());
        assert!(check_digest(" abc\n", "abc").is_ok());
        assert_eq!(
            check_digest("aa", "bb"),
            Err(VerifyError::HashMismatch {
                expected: "aa".into(),
                actual: "bb".into()
            })
        );
    }

    #[test]
    fn verify_path_ok_and_mismatch() {
        let f = temp_with(b"hello\n");
        let good = content_hash::hash_bytes(b"hello\n");
        assert_eq!(verify_path(f.path(), &good, 0).unwrap(), good);

        let bad = content_hash::hash_bytes(b"hello");
        let err = verify_path(f.path(), &bad, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VerifyError>(),
            Some(VerifyError::HashMismatch { .. })
        ));
    }

    #[test]
    fn metadata_size_checked_before_hash() {
        let f = temp_with(b"12345");
        let mut meta = meta_for(b"12345");
        meta.size = Some(6);
        let err = verify_against_metadata(f.path(), &meta, 0).unwrap_err();
        assert_eq!(
            err.downcast_ref::<VerifyError>(),
            Some(&VerifyError::SizeMismatch {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn metadata_match() {
        let content = vec![7u8; 9000];
        let f = temp_with(&content);
        let meta = meta_for(&content);
        let digest = verify_against_metadata(f.path(), &meta, 1024).unwrap();
        assert_eq!(Some(digest), meta.content_hash);
    }

    #[test]
    fn folder_metadata_has_no_hash() {
        let f = temp_with(b"");
        let mut meta = meta_for(b"");
        meta.tag = Some("folder".into());
        meta.size = None;
        meta.content_hash = None;
        let err = verify_against_metadata(f.path(), &meta, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VerifyError>(),
            Some(VerifyError::MissingHash { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error_not_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let err = verify_path(&dir.path().join("gone"), "00", 0).unwrap_err();
        assert!(err.downcast_ref::<VerifyError>().is_none());
    }
}
