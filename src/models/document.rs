//! Backup document: the artifact's logical content
//!
//! A document is a `metadata` block describing how and when the backup was
//! taken, plus a `data` block mapping collection names to the records that
//! were captured. Documents are written once and never patched; a new backup
//! fully supersedes an old one.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{VaultError, VaultResult};

use super::config::BackupConfig;

/// Current document schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Metadata block recorded inside every backup document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Unique backup identifier
    pub id: String,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Identity of whoever triggered the backup
    pub created_by: String,
    /// The config the backup was taken with
    ///
    /// Restore honors this config, never one supplied at restore time.
    pub config: BackupConfig,
    /// Schema version for migration support
    pub version: u32,
}

/// The full logical content of one backup artifact
///
/// `data` is a BTreeMap so the serialized key order is stable, which keeps
/// the byte encoding reproducible for a given dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    /// Metadata block
    pub metadata: DocumentMetadata,
    /// Collection name -> ordered records
    pub data: BTreeMap<String, Vec<serde_json::Value>>,
}

impl BackupDocument {
    /// Create a new document with a fresh id and empty data block
    pub fn new(config: BackupConfig, created_by: impl Into<String>) -> Self {
        Self {
            metadata: DocumentMetadata {
                id: Uuid::new_v4().to_string(),
                created_at: Utc::now(),
                created_by: created_by.into(),
                config,
                version: SCHEMA_VERSION,
            },
            data: BTreeMap::new(),
        }
    }

    /// Serialize to canonical UTF-8 JSON bytes
    pub fn to_bytes(&self) -> VaultResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| VaultError::Json(format!("Failed to serialize backup document: {}", e)))
    }

    /// Parse a document from bytes, validating the top-level shape
    ///
    /// Fails with `Format` when the bytes are not JSON or the `metadata` /
    /// `data` blocks are missing.
    pub fn from_bytes(bytes: &[u8]) -> VaultResult<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| VaultError::Format(format!("Backup document is not valid JSON: {}", e)))?;

        let object = value
            .as_object()
            .ok_or_else(|| VaultError::Format("Backup document must be a JSON object".into()))?;

        if !object.contains_key("metadata") || !object.contains_key("data") {
            return Err(VaultError::Format(
                "Backup document is missing its metadata or data block".into(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| VaultError::Format(format!("Malformed backup document: {}", e)))
    }

    /// Total number of records across all collections in the data block
    pub fn record_count(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }

    /// Number of collections in the data block
    pub fn table_count(&self) -> usize {
        self.data.len()
    }
}
