//! Download command: fetch a remote file and keep it only if it verifies.

use anyhow::{Context, Result};
use dbxsum_core::config::{DbxsumConfig, TOKEN_ENV};
use dbxsum_core::download::{download_verified_with_progress, DownloadRequest};
use dbxsum_core::progress::{ProgressLogger, TransferProgress};
use dbxsum_core::remote_path;
use std::path::PathBuf;

/// Bytes between progress log events.
const PROGRESS_STEP: u64 = 8 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct DownloadArgs {
    pub remote_path: String,
    pub dest: Option<PathBuf>,
    pub rev: Option<String>,
    pub token: Option<String>,
}

pub async fn run_download(cfg: &DbxsumConfig, args: DownloadArgs) -> Result<()> {
    let access_token = cfg.resolve_token(args.token.as_deref()).with_context(|| {
        format!(
            "no access token: pass --token, set {} or access_token in the config file",
            TOKEN_ENV
        )
    })?;
    let dest = args
        .dest
        .unwrap_or_else(|| PathBuf::from(remote_path::local_file_name(&args.remote_path)));

    let request = DownloadRequest {
        content_url: cfg.content_url.clone(),
        access_token,
        remote_path: args.remote_path,
        rev: args.rev,
        dest,
        connect_timeout: cfg.connect_timeout(),
        timeout: cfg.timeout(),
    };

    // curl transfers block; keep them off the async workers.
    let outcome = tokio::task::spawn_blocking(move || {
        let mut logger = ProgressLogger::new(PROGRESS_STEP);
        download_verified_with_progress(&request, &mut |p: TransferProgress| {
            logger.report(p);
        })
    })
        .await
        .context("download task panicked")??;

    println!(
        "{}  {} ({} bytes)",
        outcome.content_hash,
        outcome.path.display(),
        outcome.bytes
    );
    Ok(())
}
