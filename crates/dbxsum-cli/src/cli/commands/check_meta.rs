//! Check-meta command: verify a file against a saved metadata record.

use anyhow::{Context, Result};
use dbxsum_core::metadata::{self, FileEntry};
use dbxsum_core::verify;
use std::fs;
use std::path::Path;

pub fn run_check_meta(path: &Path, metadata_path: &Path, chunk_size: usize) -> Result<()> {
    let json = fs::read_to_string(metadata_path)
        .with_context(|| format!("read {}", metadata_path.display()))?;
    let meta = metadata::parse_metadata(&json)
        .with_context(|| format!("parse {}", metadata_path.display()))?;
    let entry = FileEntry::from(&meta);
    if entry.is_dir {
        anyhow::bail!("{} describes a folder, not a file", entry.path);
    }
    let digest = verify::verify_against_metadata(path, &meta, chunk_size)?;
    println!("{}: OK ({} bytes, {})", entry.path, entry.bytes, digest);
    Ok(())
}
