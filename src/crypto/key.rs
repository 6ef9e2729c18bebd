//! Per-backup symmetric key material
//!
//! Each encrypted backup gets a fresh random 256-bit key whose lifetime is
//! tied to exactly one artifact. Key bytes are zeroized when dropped.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{VaultError, VaultResult};

/// Length of an AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// A randomly generated symmetric backup key
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BackupKey {
    key: [u8; KEY_SIZE],
}

impl BackupKey {
    /// Generate a fresh random key from the OS CSPRNG
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    /// Construct a key from raw bytes
    ///
    /// Fails with `Encryption` if the slice is not exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> VaultResult<Self> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            VaultError::Encryption(format!(
                "Invalid key length: expected {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self { key })
    }

    /// Get the raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    /// Encode the key for the sibling key file
    pub fn encode(&self) -> String {
        use base64::{engine::general_purpose::STANDARD, Engine};
        STANDARD.encode(self.key)
    }

    /// Decode a key from its sibling-file encoding
    pub fn decode(encoded: &str) -> VaultResult<Self> {
        use base64::{engine::general_purpose::STANDARD, Engine};
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| VaultError::Encryption(format!("Invalid key encoding: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}

impl std::fmt::Debug for BackupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        write!(f, "BackupKey([REDACTED; {} bytes])", KEY_SIZE)
    }
}
