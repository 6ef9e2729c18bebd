//! Backup catalog and statistics
//!
//! Reconstructs catalog metadata from stored documents. Artifacts that do
//! not parse as documents are opaque (encrypted). That is expected, not an
//! error: they are omitted from the metadata listing but still counted by
//! the statistics.

use serde::{Deserialize, Serialize};

use crate::crypto::{checksum, is_sealed};
use crate::error::VaultResult;
use crate::models::{BackupDocument, BackupMetadata};
use crate::storage::{read_bytes, ArtifactStore};

/// Aggregate statistics over the whole artifact store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupStats {
    /// Number of stored artifacts, opaque ones included
    pub total_backups: usize,
    /// Total artifact size in bytes, opaque ones included
    pub total_size_bytes: u64,
    /// Number of sealed (encrypted) artifacts
    pub encrypted_backups: usize,
    /// Most recent parseable backup, if any
    pub latest_backup: Option<BackupMetadata>,
}

/// Lists stored backups and aggregates summary statistics
pub struct BackupCatalog<'a> {
    store: &'a ArtifactStore,
}

impl<'a> BackupCatalog<'a> {
    /// Create a new BackupCatalog over an artifact store
    pub fn new(store: &'a ArtifactStore) -> Self {
        Self { store }
    }

    /// List metadata for every parseable backup, newest first
    ///
    /// Encrypted artifacts are opaque without their key and are skipped;
    /// use [`BackupCatalog::stats`] for totals that include them.
    pub fn list_backups(&self) -> VaultResult<Vec<BackupMetadata>> {
        let mut backups = Vec::new();

        for entry in self.store.entries()? {
            let bytes = read_bytes(&entry.path)?;
            if is_sealed(&bytes) {
                continue;
            }

            // Parse failure here means the artifact is opaque, not broken
            let Ok(document) = BackupDocument::from_bytes(&bytes) else {
                continue;
            };

            backups.push(BackupMetadata {
                id: document.metadata.id.clone(),
                filename: entry.filename,
                created_at: document.metadata.created_at,
                size_bytes: entry.size_bytes,
                checksum: checksum(&bytes),
                config: document.metadata.config,
                created_by: document.metadata.created_by.clone(),
                version: document.metadata.version,
                table_count: document.table_count(),
                record_count: document.record_count(),
            });
        }

        // Sort by creation time, newest first
        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Get the most recent parseable backup
    pub fn latest(&self) -> VaultResult<Option<BackupMetadata>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Aggregate statistics over every stored artifact
    ///
    /// Unlike `list_backups`, totals here cover opaque artifacts too:
    /// sealed ones are recognized by their envelope magic and counted as
    /// encrypted.
    pub fn stats(&self) -> VaultResult<BackupStats> {
        let entries = self.store.entries()?;

        let total_backups = entries.len();
        let total_size_bytes = entries.iter().map(|e| e.size_bytes).sum();

        let mut encrypted_backups = 0;
        for entry in &entries {
            let bytes = read_bytes(&entry.path)?;
            if is_sealed(&bytes) {
                encrypted_backups += 1;
            }
        }

        Ok(BackupStats {
            total_backups,
            total_size_bytes,
            encrypted_backups,
            latest_backup: self.latest()?,
        })
    }
}
