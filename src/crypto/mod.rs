//! Cryptographic primitives for snapvault
//!
//! Provides AES-256-GCM authenticated encryption of serialized backup
//! documents, random per-backup key generation, and SHA-256 checksums of
//! persisted artifact bytes.

pub mod checksum;
pub mod key;
pub mod sealing;

pub use checksum::checksum;
pub use key::BackupKey;
pub use sealing::{is_sealed, open, seal};
