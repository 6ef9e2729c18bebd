//! Custom error types for snapvault
//!
//! This module defines the error hierarchy for the backup engine using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for snapvault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Entity not found errors (artifacts, keys)
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Bytes did not parse as the expected structure (envelope layout,
    /// backup document shape)
    #[error("Format error: {0}")]
    Format(String),

    /// Authentication or checksum failure (tampering or wrong key)
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Underlying repository read/write failed
    #[error("Repository error: {0}")]
    Repository(String),

    /// Artifact store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Encryption/decryption setup errors
    #[error("Encryption error: {0}")]
    Encryption(String),
}

impl VaultError {
    /// Create a "not found" error for backup artifacts
    pub fn artifact_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup artifact",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for key material
    pub fn key_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup key",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an integrity failure
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for snapvault operations
pub type VaultResult<T> = Result<T, VaultError>;
