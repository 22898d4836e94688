//! Block-wise content hash compatible with the storage service's `content_hash`.
//!
//! The file is split into 4 MiB blocks, each block is hashed with SHA-256,
//! and the final digest is SHA-256 over the concatenated block digests.
//! The result does not depend on how the input is chunked while reading.

mod hasher;
mod stream;


pub use hasher::ContentHasher;
pub use stream::{hash_path, hash_reader};

/// Block size used by the service when computing `content_hash`.
pub const BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Default read size when traversing a stream.
pub const DEFAULT_READ_CHUNK: usize = 8 * 1024;

/// Hash an in-memory buffer and return the digest as lowercase hex.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = ContentHasher::new();
    hasher.update(data);
    hasher.finalize_hex()
}
