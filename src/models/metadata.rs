//! Catalog-facing metadata about a stored backup
//!
//! Derived, not authoritative: every field is recomputable from the stored
//! document plus a file stat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::BackupConfig;

/// Summary of one backup artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupMetadata {
    /// Backup identifier (matches the document's metadata id)
    pub id: String,
    /// Artifact filename in the store
    pub filename: String,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size of the persisted (possibly sealed) artifact in bytes
    pub size_bytes: u64,
    /// SHA-256 hex digest of the persisted bytes
    pub checksum: String,
    /// The config the backup was taken with
    pub config: BackupConfig,
    /// Identity of whoever triggered the backup
    pub created_by: String,
    /// Document schema version
    pub version: u32,
    /// Number of collections in the data block
    pub table_count: usize,
    /// Total records across all collections
    pub record_count: usize,
}
