//! Content checksums for stored artifacts
//!
//! Checksums are computed over the exact bytes written to storage (the
//! sealed representation for encrypted backups), so integrity verification
//! never needs the key.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hex digest of a byte slice
pub fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
