//! Cryptographic Utilities

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hex-encode the first `len` bytes of a digest.
///
/// Truncation bounds the storage cost of identity members in the shared
/// store; `len` is clamped to the digest size.
pub fn truncated_hex(digest: &[u8; 32], len: usize) -> String {
    let len = len.min(digest.len());
    hex::encode(&digest[..len])
}
