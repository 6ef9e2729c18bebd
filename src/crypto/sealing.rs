//! AES-256-GCM sealed envelope
//!
//! `seal` produces a self-contained byte string that embeds everything
//! `open` needs. The layout uses explicit length fields rather than
//! delimiters so no component can be misparsed:
//!
//! ```text
//! magic "SVLT" (4) | version u8 | nonce_len u8 | nonce | ct_len u32be | ciphertext+tag
//! ```
//!
//! Each encryption operation generates a unique nonce.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use aes_gcm::aead::rand_core::RngCore;

use crate::error::{VaultError, VaultResult};

use super::key::BackupKey;

/// Magic prefix identifying a sealed artifact
const MAGIC: &[u8; 4] = b"SVLT";

/// Envelope layout version
const ENVELOPE_VERSION: u8 = 1;

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Bytes before the nonce: magic + version + nonce length
const HEADER_SIZE: usize = MAGIC.len() + 2;

/// Encrypt plaintext into a self-contained sealed envelope
///
/// Fails closed: any error leaves no partial output.
pub fn seal(plaintext: &[u8], key: &BackupKey) -> VaultResult<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| VaultError::Encryption(format!("Encryption failed: {}", e)))?;

    let ct_len = u32::try_from(ciphertext.len())
        .map_err(|_| VaultError::Encryption("Plaintext too large to seal".into()))?;

    let mut sealed = Vec::with_capacity(HEADER_SIZE + NONCE_SIZE + 4 + ciphertext.len());
    sealed.extend_from_slice(MAGIC);
    sealed.push(ENVELOPE_VERSION);
    sealed.push(NONCE_SIZE as u8);
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ct_len.to_be_bytes());
    sealed.extend_from_slice(&ciphertext);

    Ok(sealed)
}

/// Decrypt a sealed envelope
///
/// Fails with `Format` if the byte layout cannot be parsed, and with
/// `Integrity` if the authentication tag does not verify (tampering or a
/// wrong key). Never returns partially decrypted data.
pub fn open(sealed: &[u8], key: &BackupKey) -> VaultResult<Vec<u8>> {
    let (nonce_bytes, ciphertext) = parse_envelope(sealed)?;

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let nonce = Nonce::from_slice(nonce_bytes);
    cipher.decrypt(nonce, ciphertext).map_err(|_| {
        VaultError::Integrity("Authentication failed: wrong key or tampered data".into())
    })
}

/// Check whether bytes carry the sealed-envelope magic
///
/// Used by the catalog to classify opaque artifacts without attempting a
/// JSON parse.
pub fn is_sealed(bytes: &[u8]) -> bool {
    bytes.len() >= MAGIC.len() && &bytes[..MAGIC.len()] == MAGIC
}

/// Split an envelope into its nonce and ciphertext components
fn parse_envelope(sealed: &[u8]) -> VaultResult<(&[u8], &[u8])> {
    if !is_sealed(sealed) {
        return Err(VaultError::Format(
            "Not a sealed envelope: magic prefix missing".into(),
        ));
    }
    if sealed.len() < HEADER_SIZE {
        return Err(VaultError::Format("Sealed envelope truncated".into()));
    }

    let version = sealed[MAGIC.len()];
    if version != ENVELOPE_VERSION {
        return Err(VaultError::Format(format!(
            "Unsupported envelope version: {}",
            version
        )));
    }

    let nonce_len = sealed[MAGIC.len() + 1] as usize;
    if nonce_len != NONCE_SIZE {
        return Err(VaultError::Format(format!(
            "Invalid nonce size: expected {}, got {}",
            NONCE_SIZE, nonce_len
        )));
    }

    let nonce_end = HEADER_SIZE + nonce_len;
    let ct_start = nonce_end + 4;
    if sealed.len() < ct_start {
        return Err(VaultError::Format("Sealed envelope truncated".into()));
    }

    let declared_len = u32::from_be_bytes([
        sealed[nonce_end],
        sealed[nonce_end + 1],
        sealed[nonce_end + 2],
        sealed[nonce_end + 3],
    ]) as usize;
    let ciphertext = &sealed[ct_start..];
    if ciphertext.len() != declared_len {
        return Err(VaultError::Format(format!(
            "Ciphertext length mismatch: declared {}, found {}",
            declared_len,
            ciphertext.len()
        )));
    }

    Ok((&sealed[HEADER_SIZE..nonce_end], ciphertext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open_round_trip() {
        let key = BackupKey::generate();
        let plaintext = b"{\"metadata\":{},\"data\":{}}";

        let sealed = seal(plaintext, &key).unwrap();
        let opened = open(&sealed, &key).unwrap();

        assert_eq!(plaintext.as_slice(), opened.as_slice());
    }

    #[test]
    fn test_sealed_is_recognizable() {
        let key = BackupKey::generate();
        let sealed = seal(b"payload", &key).unwrap();

        assert!(is_sealed(&sealed));
        assert!(!is_sealed(b"{\"metadata\":{}}"));
        assert!(!is_sealed(b""));
    }

    #[test]
    fn test_different_nonces() {
        let key = BackupKey::generate();
        let a = seal(b"same plaintext", &key).unwrap();
        let b = seal(b"same plaintext", &key).unwrap();

        // Same plaintext must not produce the same envelope
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails_with_integrity() {
        let sealed = seal(b"secret", &BackupKey::generate()).unwrap();
        let err = open(&sealed, &BackupKey::generate()).unwrap_err();
        assert!(err.is_integrity());
    }

    #[test]
    fn test_every_flipped_byte_detected() {
        let key = BackupKey::generate();
        let sealed = seal(b"tamper target", &key).unwrap();

        let nonce_end = HEADER_SIZE + NONCE_SIZE;
        let ct_start = nonce_end + 4;

        for i in 0..sealed.len() {
            let mut tampered = sealed.clone();
            tampered[i] ^= 0x01;
            let err = open(&tampered, &key).unwrap_err();

            if i < HEADER_SIZE || (nonce_end..ct_start).contains(&i) {
                // Damage to the magic, version, or length fields cannot be
                // parsed as an envelope at all
                assert!(
                    matches!(err, VaultError::Format(_)),
                    "flip at header byte {} should be a format error, got {}",
                    i,
                    err
                );
            } else {
                // Damage to the nonce or ciphertext trips authentication
                assert!(
                    err.is_integrity(),
                    "flip at byte {} should be an integrity error, got {}",
                    i,
                    err
                );
            }
        }
    }

    #[test]
    fn test_truncated_envelope_is_format_error() {
        let key = BackupKey::generate();
        let sealed = seal(b"payload", &key).unwrap();

        let err = open(&sealed[..8], &key).unwrap_err();
        assert!(matches!(err, VaultError::Format(_)));
    }

    #[test]
    fn test_plaintext_bytes_are_format_error() {
        let key = BackupKey::generate();
        let err = open(b"{\"metadata\":{},\"data\":{}}", &key).unwrap_err();
        assert!(matches!(err, VaultError::Format(_)));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = BackupKey::generate();
        let sealed = seal(b"", &key).unwrap();
        let opened = open(&sealed, &key).unwrap();
        assert!(opened.is_empty());
    }

    #[test]
    fn test_large_plaintext() {
        let key = BackupKey::generate();
        let plaintext: Vec<u8> = (0..100_000).map(|i| (i % 256) as u8).collect();

        let sealed = seal(&plaintext, &key).unwrap();
        let opened = open(&sealed, &key).unwrap();

        assert_eq!(plaintext, opened);
    }
}
