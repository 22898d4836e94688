//! Stream-driving read loop.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::{ContentHasher, DEFAULT_READ_CHUNK};

/// Hash everything `reader` yields and return the digest as lowercase hex.
///
/// Each read asks for at most `min(read_chunk_size, bytes left in block)`, so
/// a read never straddles a block boundary. `read_chunk_size == 0` means
/// [`DEFAULT_READ_CHUNK`]. The reader is not closed; any I/O error other
/// than `Interrupted` aborts and discards the partial state.
pub fn hash_reader<R: Read + ?Sized>(
    reader: &mut R,
    read_chunk_size: usize,
) -> io::Result<String> {
    let chunk = if read_chunk_size == 0 {
        DEFAULT_READ_CHUNK
    } else {
        read_chunk_size
    };
    let mut buf = vec![0u8; chunk];
    let mut hasher = ContentHasher::new();
    loop {
        let want = chunk.min(hasher.remaining_in_block());
        let n = match reader.read(&mut buf[..want]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    tracing::trace!(bytes = hasher.bytes_hashed(), "content hash stream drained");
    Ok(hasher.finalize_hex())
}

/// Compute the content hash of a file.
/// The file handle is dropped (closed) on every return path.
pub fn hash_path(path: &Path, read_chunk_size: usize) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let digest =
        hash_reader(&mut f, read_chunk_size).with_context(|| format!("read {}", path.display()))?;
    tracing::debug!(path = %path.display(), %digest, "content hash computed");
    Ok(digest)
}
