//! In-memory repository
//!
//! Backs the engine's tests and gives embedders a reference implementation
//! of the repository contract.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::error::{VaultError, VaultResult};
use crate::models::Collection;

use super::{record_id, Record, Repository};

/// Thread-safe in-memory repository keyed by collection and record id
///
/// Records within a collection are ordered by id, so `find_many` output is
/// deterministic.
#[derive(Default)]
pub struct MemoryRepository {
    data: RwLock<HashMap<Collection, BTreeMap<String, Record>>>,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly, reading its id field
    ///
    /// Convenience for seeding test data; records without an id are rejected.
    pub fn insert(&self, collection: Collection, record: Record) -> VaultResult<()> {
        let id = record_id(&record)
            .ok_or_else(|| VaultError::Repository("Record is missing an id field".into()))?
            .to_string();
        self.upsert(collection, &id, record)
    }

    /// Number of records currently in a collection
    pub fn count(&self, collection: Collection) -> VaultResult<usize> {
        let data = self.data.read().map_err(|e| {
            VaultError::Repository(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(&collection).map_or(0, BTreeMap::len))
    }

    /// Remove every record from every collection
    pub fn clear(&self) -> VaultResult<()> {
        let mut data = self.data.write().map_err(|e| {
            VaultError::Repository(format!("Failed to acquire write lock: {}", e))
        })?;
        data.clear();
        Ok(())
    }
}

impl Repository for MemoryRepository {
    fn find_many(&self, collection: Collection) -> VaultResult<Vec<Record>> {
        let data = self.data.read().map_err(|e| {
            VaultError::Repository(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .get(&collection)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    fn upsert(&self, collection: Collection, id: &str, record: Record) -> VaultResult<()> {
        if !record.is_object() {
            return Err(VaultError::Repository(format!(
                "Record '{}' is not an object",
                id
            )));
        }

        let mut data = self.data.write().map_err(|e| {
            VaultError::Repository(format!("Failed to acquire write lock: {}", e))
        })?;

        data.entry(collection)
            .or_default()
            .insert(id.to_string(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_and_find() {
        let repo = MemoryRepository::new();
        repo.insert(Collection::Customers, json!({"id": "c1", "name": "Acme"}))
            .unwrap();
        repo.insert(Collection::Customers, json!({"id": "c2", "name": "Globex"}))
            .unwrap();

        let records = repo.find_many(Collection::Customers).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(record_id(&records[0]), Some("c1"));
    }

    #[test]
    fn test_insert_without_id_rejected() {
        let repo = MemoryRepository::new();
        let err = repo
            .insert(Collection::Customers, json!({"name": "anonymous"}))
            .unwrap_err();
        assert!(matches!(err, VaultError::Repository(_)));
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let repo = MemoryRepository::new();
        repo.upsert(Collection::Packages, "p1", json!({"id": "p1", "tier": "basic"}))
            .unwrap();
        repo.upsert(Collection::Packages, "p1", json!({"id": "p1", "tier": "pro"}))
            .unwrap();

        let records = repo.find_many(Collection::Packages).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["tier"], "pro");
    }

    #[test]
    fn test_empty_collection() {
        let repo = MemoryRepository::new();
        assert!(repo.find_many(Collection::AdminLogs).unwrap().is_empty());
        assert_eq!(repo.count(Collection::AdminLogs).unwrap(), 0);
    }

    #[test]
    fn test_clear() {
        let repo = MemoryRepository::new();
        repo.insert(Collection::Invoices, json!({"id": "i1"})).unwrap();
        repo.clear().unwrap();
        assert_eq!(repo.count(Collection::Invoices).unwrap(), 0);
    }

    #[test]
    fn test_non_object_record_rejected() {
        let repo = MemoryRepository::new();
        let err = repo
            .upsert(Collection::Invoices, "i1", json!("just a string"))
            .unwrap_err();
        assert!(matches!(err, VaultError::Repository(_)));
    }
}
