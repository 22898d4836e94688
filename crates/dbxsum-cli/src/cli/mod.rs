//! CLI for dbxsum.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use dbxsum_core::config;
use std::path::PathBuf;

use commands::{
    run_check_meta, run_completions, run_download, run_hash, run_man, run_verify, DownloadArgs,
};

/// Top-level CLI for dbxsum.
#[derive(Debug, Parser)]
#[command(name = "dbxsum")]
#[command(about = "dbxsum: block-wise content hashes and verified downloads", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the content hash of one or more files.
    Hash {
        /// Files to hash.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Read size in bytes (speed only; never changes the digest).
        #[arg(long, value_name = "BYTES")]
        chunk_size: Option<usize>,
    },

    /// Check a file against an expected content hash.
    Verify {
        /// Path to the file.
        path: PathBuf,
        /// Expected hex digest.
        expected: String,
        /// Read size in bytes.
        #[arg(long, value_name = "BYTES")]
        chunk_size: Option<usize>,
    },

    /// Check a file against a saved metadata JSON record (size and content hash).
    CheckMeta {
        /// Path to the local file.
        path: PathBuf,
        /// Path to the metadata JSON.
        metadata: PathBuf,
    },

    /// Download a remote file and verify it before keeping it.
    Download {
        /// Remote path, e.g. /Backups/archive.tar.
        remote_path: String,
        /// Local destination (default: last segment of the remote path).
        #[arg(long, value_name = "PATH")]
        dest: Option<PathBuf>,
        /// Download this revision instead of the latest.
        #[arg(long)]
        rev: Option<String>,
        /// Access token (default: DBXSUM_ACCESS_TOKEN, then config file).
        #[arg(long)]
        token: Option<String>,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Hash { paths, chunk_size } => {
                run_hash(&paths, chunk_size.unwrap_or(cfg.read_chunk_size))?
            }
            CliCommand::Verify {
                path,
                expected,
                chunk_size,
            } => run_verify(&path, &expected, chunk_size.unwrap_or(cfg.read_chunk_size))?,
            CliCommand::CheckMeta { path, metadata } => {
                run_check_meta(&path, &metadata, cfg.read_chunk_size)?
            }
            CliCommand::Download {
                remote_path,
                dest,
                rev,
                token,
            } => {
                let args = DownloadArgs {
                    remote_path,
                    dest,
                    rev,
                    token,
                };
                run_download(&cfg, args).await?
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
