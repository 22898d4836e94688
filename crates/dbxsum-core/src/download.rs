//! Verified download: stream a remote file to disk while hashing it, then
//! check the byte count and content hash against the metadata the service
//! returned with the body.

use anyhow::{Context, Result};
use serde_json::json;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::content_hash::ContentHasher;
use crate::metadata::FileMetadata;
use crate::progress::TransferProgress;
use crate::remote_path::{revision_path, to_remote_path};
use crate::transport::{self, ContentRequest};
use crate::verify::{self, VerifyError};

/// Endpoint path for downloads, relative to the content base URL.
pub const DOWNLOAD_ENDPOINT: &str = "2/files/download";

/// Temporary file suffix used before the verified file is renamed into place.
pub const TEMP_SUFFIX: &str = ".part";

/// What to download and where to put it.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub content_url: String,
    pub access_token: String,
    pub remote_path: String,
    /// Fetch this revision instead of the latest one.
    pub rev: Option<String>,
    pub dest: PathBuf,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

/// A download whose size and content hash matched the service's metadata.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub metadata: FileMetadata,
    pub path: PathBuf,
    pub bytes: u64,
    pub content_hash: String,
}

/// File writer that feeds every written byte into a [`ContentHasher`].
struct HashingSink {
    file: BufWriter<File>,
    hasher: ContentHasher,
}

impl Write for HashingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn temp_path_for(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Downloads `req.remote_path` to `req.dest`, verifying size and content hash.
///
/// The body is written to `<dest>.part` and renamed only after both checks
/// pass; on any failure the temp file is removed and `dest` is untouched.
pub fn download_verified(req: &DownloadRequest) -> Result<DownloadOutcome> {
    download_verified_with_progress(req, &mut |_: TransferProgress| {})
}

/// Like [`download_verified`], reporting progress after every written chunk.
pub fn download_verified_with_progress(
    req: &DownloadRequest,
    progress: &mut dyn FnMut(TransferProgress),
) -> Result<DownloadOutcome> {
    let path_arg = match req.rev.as_deref() {
        Some(rev) => revision_path(rev),
        None => to_remote_path(&req.remote_path),
    };
    let request = ContentRequest {
        url: transport::content_endpoint(&req.content_url, DOWNLOAD_ENDPOINT)?,
        access_token: req.access_token.clone(),
        arg: json!({ "path": path_arg }),
        connect_timeout: req.connect_timeout,
        timeout: req.timeout,
    };

    let temp_path = temp_path_for(&req.dest);
    match fetch_to_temp(&request, &temp_path, progress) {
        Ok((metadata, bytes, content_hash)) => {
            fs::rename(&temp_path, &req.dest).with_context(|| {
                format!("rename {} -> {}", temp_path.display(), req.dest.display())
            })?;
            tracing::info!(
                remote = %path_arg,
                dest = %req.dest.display(),
                bytes,
                %content_hash,
                "download verified"
            );
            Ok(DownloadOutcome {
                metadata,
                path: req.dest.clone(),
                bytes,
                content_hash,
            })
        }
        Err(e) => {
            if let Err(rm) = fs::remove_file(&temp_path) {
                if rm.kind() != io::ErrorKind::NotFound {
                    tracing::debug!("could not remove {}: {}", temp_path.display(), rm);
                }
            }
            Err(e)
        }
    }
}

fn fetch_to_temp(
    request: &ContentRequest,
    temp_path: &Path,
    progress: &mut dyn FnMut(TransferProgress),
) -> Result<(FileMetadata, u64, String)> {
    let file = File::create(temp_path)
        .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
    let mut sink = HashingSink {
        file: BufWriter::new(file),
        hasher: ContentHasher::new(),
    };

    let response = transport::perform_with_progress(request, &mut sink, progress)?
        .error_for_status()?;
    let metadata = transport::api_result(&response)?;

    sink.file.flush().context("flush downloaded file")?;
    sink.file.get_ref().sync_all().context("sync downloaded file")?;
    let HashingSink { file, hasher } = sink;
    drop(file);

    let bytes = hasher.bytes_hashed();
    let actual = hasher.finalize_hex();

    if let Some(expected) = metadata.size {
        verify::check_size(expected, bytes)?;
    }
    let expected = metadata
        .content_hash
        .as_deref()
        .ok_or_else(|| VerifyError::MissingHash {
            name: metadata.name.clone(),
        })?;
    if let Err(e) = verify::check_digest(expected, &actual) {
        tracing::warn!(remote = %metadata.name, "{}", e);
        return Err(e.into());
    }

    Ok((metadata, bytes, actual))
}
