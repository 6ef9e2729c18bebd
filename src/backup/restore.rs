//! Restore engine
//!
//! Locates an artifact, opens it if a key is supplied, validates the
//! document shape, and replays every collection recorded in the document
//! back into the repository with idempotent upserts. Per-record failures are
//! collected into the report instead of aborting the run; only
//! artifact-location, decryption, and structural-parsing problems raise.

use serde_json::Value;
use tracing::{info, warn};

use crate::crypto::{is_sealed, open, BackupKey};
use crate::error::{VaultError, VaultResult};
use crate::models::{BackupDocument, Collection};
use crate::repository::{record_id, Repository};
use crate::storage::ArtifactStore;

/// Replays backup artifacts into a live repository
pub struct RestoreEngine<'a, R: Repository> {
    repository: &'a R,
    store: &'a ArtifactStore,
}

/// Accumulated outcome of one restore operation
///
/// Created empty at restore start, mutated monotonically during replay, and
/// frozen when returned.
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Number of records successfully upserted
    pub records_restored: usize,
    /// Collections in which every record upserted successfully
    pub tables_restored: Vec<String>,
    /// Per-record failure messages, each naming its collection
    pub errors: Vec<String>,
    /// Informational messages
    pub warnings: Vec<String>,
}

impl RestoreReport {
    /// A restore succeeded when no errors were collected
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable roll-up of the restore outcome
    pub fn summary(&self) -> String {
        if self.success() {
            format!(
                "Restored {} records across {} tables",
                self.records_restored,
                self.tables_restored.len()
            )
        } else {
            format!(
                "Restored {} records across {} tables with {} errors",
                self.records_restored,
                self.tables_restored.len(),
                self.errors.len()
            )
        }
    }
}

impl<'a, R: Repository> RestoreEngine<'a, R> {
    /// Create a new RestoreEngine over a repository and an artifact store
    pub fn new(repository: &'a R, store: &'a ArtifactStore) -> Self {
        Self { repository, store }
    }

    /// Restore a backup artifact into the repository
    ///
    /// Pass the backup key for encrypted artifacts. A mismatch is an error:
    /// an encrypted artifact without a key fails with `Integrity`, a key
    /// supplied for a plaintext artifact fails with `Format`.
    ///
    /// Replay honors the config recorded in the document at backup time,
    /// never a config supplied at restore time. Upserts are keyed by each
    /// record's own id, so restoring the same artifact twice yields the same
    /// end state.
    pub fn restore(
        &self,
        artifact_id: &str,
        key: Option<&BackupKey>,
    ) -> VaultResult<RestoreReport> {
        let bytes = self
            .store
            .get(artifact_id)?
            .ok_or_else(|| VaultError::artifact_not_found(artifact_id))?;

        let plaintext = match key {
            Some(key) => {
                if !is_sealed(&bytes) {
                    return Err(VaultError::Format(
                        "Key supplied but the artifact is not encrypted".into(),
                    ));
                }
                open(&bytes, key)?
            }
            None => {
                if is_sealed(&bytes) {
                    return Err(VaultError::Integrity(
                        "Artifact is encrypted; a key is required to restore it".into(),
                    ));
                }
                bytes
            }
        };

        let document = BackupDocument::from_bytes(&plaintext)?;
        info!(backup_id = %document.metadata.id, "starting restore");

        let mut report = RestoreReport::default();

        for (name, records) in &document.data {
            let Some(collection) = Collection::parse(name) else {
                report
                    .warnings
                    .push(format!("Skipping unknown collection '{}'", name));
                continue;
            };

            // Replay only what the backup-time config enabled
            if !document.metadata.config.is_enabled(collection) {
                report.warnings.push(format!(
                    "Skipping '{}': not enabled in the backup's config",
                    name
                ));
                continue;
            }

            self.replay_collection(collection, records, &mut report);
        }

        if report.success() {
            report
                .warnings
                .push(format!("{} records restored", report.records_restored));
            info!(
                backup_id = %document.metadata.id,
                records = report.records_restored,
                "restore complete"
            );
        } else {
            warn!(
                backup_id = %document.metadata.id,
                records = report.records_restored,
                errors = report.errors.len(),
                "restore completed with errors"
            );
        }

        Ok(report)
    }

    /// Replay one collection, capturing per-record failures
    ///
    /// A collection enters `tables_restored` only when every one of its
    /// records upserted successfully.
    fn replay_collection(
        &self,
        collection: Collection,
        records: &[Value],
        report: &mut RestoreReport,
    ) {
        let name = collection.name();
        let mut failed = 0usize;

        for record in records {
            match record_id(record) {
                Some(id) => match self.repository.upsert(collection, id, record.clone()) {
                    Ok(()) => report.records_restored += 1,
                    Err(e) => {
                        failed += 1;
                        report
                            .errors
                            .push(format!("{}: failed to restore record '{}': {}", name, id, e));
                    }
                },
                None => {
                    failed += 1;
                    report
                        .errors
                        .push(format!("{}: record is missing an id field", name));
                }
            }
        }

        if failed == 0 {
            report.tables_restored.push(name.to_string());
        }
    }
}
