//! Verify command: compare a file with an expected content hash.

use anyhow::Result;
use dbxsum_core::verify;
use std::path::Path;

pub fn run_verify(path: &Path, expected: &str, chunk_size: usize) -> Result<()> {
    verify::verify_path(path, expected, chunk_size)?;
    println!("{}: OK", path.display());
    Ok(())
}
