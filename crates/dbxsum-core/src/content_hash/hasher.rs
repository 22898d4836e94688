//! Incremental block hasher.

use sha2::{Digest, Sha256};
use std::io;

use super::BLOCK_SIZE;

/// Accumulates the two-level content hash over bytes fed in any slice size.
///
/// Bytes go into the current block's SHA-256; when the block reaches
/// `block_size` its raw digest is fed into the outer SHA-256 and a fresh
/// block starts. A trailing partial block is flushed by `finalize`.
#[derive(Debug, Clone)]
pub struct ContentHasher {
    stream: Sha256,
    block: Sha256,
    block_size: usize,
    block_len: usize,
    total: u64,
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHasher {
    /// Hasher using the service's 4 MiB block size.
    pub fn new() -> Self {
        Self::with_block_size(BLOCK_SIZE)
    }

    /// Hasher with a custom block size (clamped to at least 1 byte).
    ///
    /// Digests produced with anything other than [`BLOCK_SIZE`] will not
    /// match the service's `content_hash`.
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            stream: Sha256::new(),
            block: Sha256::new(),
            block_size: block_size.max(1),
            block_len: 0,
            total: 0,
        }
    }

    /// Bytes still needed to complete the current block.
    pub fn remaining_in_block(&self) -> usize {
        self.block_size - self.block_len
    }

    /// Total number of bytes fed so far.
    pub fn bytes_hashed(&self) -> u64 {
        self.total
    }

    /// Feed bytes. Slices crossing a block boundary are split at the boundary.
    pub fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            let take = self.remaining_in_block().min(data.len());
            let (head, rest) = data.split_at(take);
            self.block.update(head);
            self.block_len += take;
            self.total += take as u64;
            data = rest;
            if self.block_len == self.block_size {
                self.flush_block();
            }
        }
    }

    fn flush_block(&mut self) {
        let digest = self.block.finalize_reset();
        self.stream.update(digest);
        self.block_len = 0;
    }

    /// Finish hashing and return the raw 32-byte digest.
    pub fn finalize(mut self) -> [u8; 32] {
        if self.block_len > 0 {
            self.flush_block();
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.stream.finalize());
        out
    }

    /// Finish hashing and return the digest as lowercase hex.
    pub fn finalize_hex(self) -> String {
        hex::encode(self.finalize())
    }
}

impl io::Write for ContentHasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
