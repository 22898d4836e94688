//! Hash command: print the content hash of files.

use anyhow::Result;
use dbxsum_core::content_hash;
use std::path::PathBuf;

/// Print `<digest>  <path>` for each file; stops at the first unreadable one.
pub fn run_hash(paths: &[PathBuf], chunk_size: usize) -> Result<()> {
    for path in paths {
        let digest = content_hash::hash_path(path, chunk_size)?;
        println!("{}  {}", digest, path.display());
    }
    Ok(())
}
