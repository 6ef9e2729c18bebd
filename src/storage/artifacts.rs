//! Durable, addressable storage for backup artifacts
//!
//! One file per backup (`backup-<id>.snap`) plus, for encrypted backups, a
//! sibling key file (`backup-<id>.key`) named predictably from the artifact.
//!
//! Lookup contract: `get`/`delete`/`resolve` match by *substring* against
//! stored identifiers. Callers should pass sufficiently unique identifiers
//! (a full UUID) to avoid ambiguous matches; when several artifacts match,
//! the first in directory order wins.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::config::paths::StorePaths;
use crate::crypto::key::BackupKey;
use crate::error::{VaultError, VaultResult};

use super::file_io::{read_bytes, write_bytes_atomic};

/// Artifact filename prefix
const ARTIFACT_PREFIX: &str = "backup-";

/// Artifact body extension
const ARTIFACT_EXT: &str = "snap";

/// Key sibling extension
const KEY_EXT: &str = "key";

/// A stored artifact plus its filesystem metadata
#[derive(Debug, Clone)]
pub struct ArtifactEntry {
    /// Identifier embedded in the filename
    pub id: String,
    /// Artifact filename
    pub filename: String,
    /// Full path to the artifact
    pub path: PathBuf,
    /// Size in bytes
    pub size_bytes: u64,
    /// Filesystem modification time
    pub modified: DateTime<Utc>,
}

/// Filesystem-backed store for backup artifacts and their key material
pub struct ArtifactStore {
    paths: StorePaths,
}

impl ArtifactStore {
    /// Create a new ArtifactStore, ensuring its directories exist
    pub fn new(paths: StorePaths) -> VaultResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    /// Persist artifact bytes under an identifier, atomically
    ///
    /// Returns the artifact filename.
    pub fn put(&self, id: &str, bytes: &[u8]) -> VaultResult<String> {
        let filename = format!("{}{}.{}", ARTIFACT_PREFIX, id, ARTIFACT_EXT);
        let path = self.paths.artifact_dir().join(&filename);
        write_bytes_atomic(&path, bytes)?;
        Ok(filename)
    }

    /// Persist an artifact body and, for encrypted backups, its key sibling
    ///
    /// The body is written first. If the key write then fails, the body is
    /// rolled back so neither an orphaned key nor an undecryptable published
    /// artifact remains; a rollback failure is reported in the returned
    /// error rather than discarded.
    pub fn publish(
        &self,
        id: &str,
        bytes: &[u8],
        key: Option<&BackupKey>,
    ) -> VaultResult<String> {
        let filename = self.put(id, bytes)?;

        if let Some(key) = key {
            if let Err(key_err) = self.put_key(id, key) {
                let body_path = self.paths.artifact_dir().join(&filename);
                return match fs::remove_file(&body_path) {
                    Ok(()) => Err(key_err),
                    Err(rollback_err) => Err(VaultError::Storage(format!(
                        "Key write failed ({}) and artifact rollback failed: {}",
                        key_err, rollback_err
                    ))),
                };
            }
        }

        Ok(filename)
    }

    /// Retrieve artifact bytes by identifier (substring match)
    pub fn get(&self, id: &str) -> VaultResult<Option<Vec<u8>>> {
        match self.resolve(id)? {
            Some(entry) => Ok(Some(read_bytes(&entry.path)?)),
            None => Ok(None),
        }
    }

    /// List all stored artifact identifiers
    pub fn list(&self) -> VaultResult<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|e| e.id).collect())
    }

    /// Enumerate all stored artifacts with filesystem metadata
    pub fn entries(&self) -> VaultResult<Vec<ArtifactEntry>> {
        let dir = self.paths.artifact_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for entry in fs::read_dir(&dir)
            .map_err(|e| VaultError::Storage(format!("Failed to read artifact directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| VaultError::Storage(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if let Some(artifact) = parse_artifact_entry(&path)? {
                entries.push(artifact);
            }
        }

        Ok(entries)
    }

    /// Resolve an identifier to a stored artifact (substring match)
    pub fn resolve(&self, id: &str) -> VaultResult<Option<ArtifactEntry>> {
        if id.is_empty() {
            return Ok(None);
        }
        Ok(self.entries()?.into_iter().find(|e| e.id.contains(id)))
    }

    /// Delete an artifact and its key sibling by identifier (substring match)
    ///
    /// Returns true if an artifact was deleted.
    pub fn delete(&self, id: &str) -> VaultResult<bool> {
        let Some(entry) = self.resolve(id)? else {
            return Ok(false);
        };

        fs::remove_file(&entry.path)
            .map_err(|e| VaultError::Storage(format!("Failed to delete artifact: {}", e)))?;

        // Remove the key sibling if one exists
        let key_path = self.key_path(&entry.id);
        if key_path.exists() {
            fs::remove_file(&key_path)
                .map_err(|e| VaultError::Storage(format!("Failed to delete key file: {}", e)))?;
        }

        Ok(true)
    }

    /// Persist the key sibling for an artifact, atomically
    pub fn put_key(&self, id: &str, key: &BackupKey) -> VaultResult<()> {
        let path = self.key_path(id);
        write_bytes_atomic(&path, key.encode().as_bytes())
    }

    /// Retrieve the key sibling for an artifact (substring match on the
    /// artifact, exact sibling naming from there)
    pub fn get_key(&self, id: &str) -> VaultResult<Option<BackupKey>> {
        let Some(entry) = self.resolve(id)? else {
            return Ok(None);
        };

        let path = self.key_path(&entry.id);
        if !path.exists() {
            return Ok(None);
        }

        let encoded = String::from_utf8(read_bytes(&path)?)
            .map_err(|e| VaultError::Encryption(format!("Invalid key file encoding: {}", e)))?;
        Ok(Some(BackupKey::decode(&encoded)?))
    }

    /// Full path of the key sibling for an artifact id
    fn key_path(&self, id: &str) -> PathBuf {
        self.paths
            .artifact_dir()
            .join(format!("{}{}.{}", ARTIFACT_PREFIX, id, KEY_EXT))
    }
}

/// Parse an artifact entry from a directory path, skipping non-artifacts
fn parse_artifact_entry(path: &std::path::Path) -> VaultResult<Option<ArtifactEntry>> {
    if path.extension().map_or(true, |ext| ext != ARTIFACT_EXT) {
        return Ok(None);
    }

    let Some(filename) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
        return Ok(None);
    };

    let Some(id) = filename
        .strip_prefix(ARTIFACT_PREFIX)
        .and_then(|rest| rest.strip_suffix(&format!(".{}", ARTIFACT_EXT)))
    else {
        return Ok(None);
    };

    let metadata = fs::metadata(path)
        .map_err(|e| VaultError::Storage(format!("Failed to stat artifact: {}", e)))?;
    let modified: DateTime<Utc> = metadata
        .modified()
        .map(DateTime::from)
        .unwrap_or_else(|_| Utc::now());

    Ok(Some(ArtifactEntry {
        id: id.to_string(),
        filename,
        path: path.to_path_buf(),
        size_bytes: metadata.len(),
        modified,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (ArtifactStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = ArtifactStore::new(paths).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_put_and_get() {
        let (store, _temp) = create_test_store();

        let filename = store.put("abc-123", b"artifact bytes").unwrap();
        assert_eq!(filename, "backup-abc-123.snap");

        let bytes = store.get("abc-123").unwrap().unwrap();
        assert_eq!(bytes, b"artifact bytes");
    }

    #[test]
    fn test_get_by_substring() {
        let (store, _temp) = create_test_store();

        store.put("550e8400-e29b-41d4-a716-446655440000", b"payload").unwrap();

        // A unique fragment of the id resolves the artifact
        let bytes = store.get("446655440000").unwrap().unwrap();
        assert_eq!(bytes, b"payload");
    }

    #[test]
    fn test_get_missing_returns_none() {
        let (store, _temp) = create_test_store();
        assert!(store.get("nothing-here").unwrap().is_none());
        assert!(store.get("").unwrap().is_none());
    }

    #[test]
    fn test_list_ids() {
        let (store, _temp) = create_test_store();

        store.put("first", b"a").unwrap();
        store.put("second", b"b").unwrap();

        let mut ids = store.list().unwrap();
        ids.sort();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_key_files_not_listed_as_artifacts() {
        let (store, _temp) = create_test_store();

        store.put("only-one", b"a").unwrap();
        store.put_key("only-one", &BackupKey::generate()).unwrap();

        assert_eq!(store.list().unwrap(), vec!["only-one"]);
    }

    #[test]
    fn test_key_round_trip() {
        let (store, _temp) = create_test_store();

        let key = BackupKey::generate();
        store.put("enc-1", b"sealed").unwrap();
        store.put_key("enc-1", &key).unwrap();

        let loaded = store.get_key("enc-1").unwrap().unwrap();
        assert_eq!(loaded.as_bytes(), key.as_bytes());
    }

    #[test]
    fn test_get_key_missing_returns_none() {
        let (store, _temp) = create_test_store();

        store.put("plain-1", b"not sealed").unwrap();
        assert!(store.get_key("plain-1").unwrap().is_none());
    }

    #[test]
    fn test_delete_removes_artifact_and_key() {
        let (store, temp) = create_test_store();

        store.put("victim", b"bytes").unwrap();
        store.put_key("victim", &BackupKey::generate()).unwrap();

        assert!(store.delete("victim").unwrap());
        assert!(store.get("victim").unwrap().is_none());

        let key_path = temp.path().join("backups").join("backup-victim.key");
        assert!(!key_path.exists());
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let (store, _temp) = create_test_store();
        assert!(!store.delete("ghost").unwrap());
    }

    #[test]
    fn test_publish_plaintext_writes_no_key() {
        let (store, temp) = create_test_store();

        let filename = store.publish("plain", b"document bytes", None).unwrap();
        assert_eq!(filename, "backup-plain.snap");
        assert_eq!(store.get("plain").unwrap().unwrap(), b"document bytes");

        let key_path = temp.path().join("backups").join("backup-plain.key");
        assert!(!key_path.exists());
    }

    #[test]
    fn test_publish_with_key_writes_both() {
        let (store, _temp) = create_test_store();

        let key = BackupKey::generate();
        store.publish("enc", b"sealed bytes", Some(&key)).unwrap();

        assert_eq!(store.get("enc").unwrap().unwrap(), b"sealed bytes");
        let loaded = store.get_key("enc").unwrap().unwrap();
        assert_eq!(loaded.as_bytes(), key.as_bytes());
    }

    #[test]
    fn test_failed_key_write_rolls_back_artifact() {
        let (store, temp) = create_test_store();

        // A directory squatting on the key path makes the key write's
        // atomic rename fail
        let key_path = temp.path().join("backups").join("backup-doomed.key");
        fs::create_dir_all(&key_path).unwrap();

        let err = store
            .publish("doomed", b"sealed bytes", Some(&BackupKey::generate()))
            .unwrap_err();
        assert!(matches!(err, VaultError::Storage(_)));

        // The body was rolled back: no half-published artifact remains
        assert!(store.list().unwrap().is_empty());
        assert!(store.get("doomed").unwrap().is_none());
    }

    #[test]
    fn test_entries_expose_size() {
        let (store, _temp) = create_test_store();

        store.put("sized", b"12345").unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size_bytes, 5);
        assert_eq!(entries[0].id, "sized");
    }
}
