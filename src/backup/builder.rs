//! Snapshot builder
//!
//! Reads the configured subset of collections from the repository, assembles
//! a self-describing backup document, optionally seals it with a fresh
//! random key, persists it atomically, and returns catalog metadata.

use tracing::info;

use crate::crypto::{checksum, seal, BackupKey};
use crate::error::VaultResult;
use crate::models::{BackupConfig, BackupDocument, BackupMetadata};
use crate::repository::Repository;
use crate::storage::ArtifactStore;

/// Creates backup artifacts from a live repository
pub struct SnapshotBuilder<'a, R: Repository> {
    repository: &'a R,
    store: &'a ArtifactStore,
}

impl<'a, R: Repository> SnapshotBuilder<'a, R> {
    /// Create a new SnapshotBuilder over a repository and an artifact store
    pub fn new(repository: &'a R, store: &'a ArtifactStore) -> Self {
        Self { repository, store }
    }

    /// Create a backup and return its catalog metadata
    ///
    /// Collections are fetched in precedence order after nested suppression
    /// (see [`BackupConfig::resolved_collections`]). A repository read
    /// failure aborts the whole operation before anything is written; a
    /// failed key write removes the just-written artifact body so neither an
    /// orphaned key nor an undecryptable artifact is left behind.
    pub fn create_backup(
        &self,
        config: BackupConfig,
        created_by: &str,
    ) -> VaultResult<BackupMetadata> {
        let collections = config.resolved_collections();
        let mut document = BackupDocument::new(config, created_by);

        // Fetch everything before any byte is persisted
        for collection in &collections {
            let records = self.repository.find_many(*collection)?;
            document.data.insert(collection.name().to_string(), records);
        }

        let plaintext = document.to_bytes()?;

        let (body, key) = if config.encrypt_backup {
            let key = BackupKey::generate();
            let sealed = seal(&plaintext, &key)?;
            (sealed, Some(key))
        } else {
            (plaintext, None)
        };

        let id = document.metadata.id.clone();
        let filename = self.store.publish(&id, &body, key.as_ref())?;

        let metadata = BackupMetadata {
            id,
            filename,
            created_at: document.metadata.created_at,
            size_bytes: body.len() as u64,
            checksum: checksum(&body),
            config,
            created_by: created_by.to_string(),
            version: document.metadata.version,
            table_count: collections.len(),
            record_count: document.record_count(),
        };

        info!(
            backup_id = %metadata.id,
            tables = metadata.table_count,
            records = metadata.record_count,
            encrypted = config.encrypt_backup,
            "backup created"
        );

        Ok(metadata)
    }

    /// Delete a backup artifact (and its key sibling) by identifier
    ///
    /// Returns true if an artifact was deleted.
    pub fn delete_backup(&self, id: &str) -> VaultResult<bool> {
        let deleted = self.store.delete(id)?;
        if deleted {
            info!(backup_id = %id, "backup deleted");
        }
        Ok(deleted)
    }
}
