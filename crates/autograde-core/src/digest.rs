//! Answer digests.
//!
//! Answers are compared through one-way SHA-256 digests so the key file
//! never has to carry a plaintext answer.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the UTF-8 encoding of `s`.
pub fn sha256_hex(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hex::encode(hasher.finalize())
}
