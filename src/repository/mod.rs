//! Repository interface consumed by the backup engine
//!
//! The engine treats the relational store as an abstract CRUD repository
//! keyed by entity id. Records are opaque structured maps; the engine moves
//! their fields without interpreting domain semantics. Implementations are
//! injected into the builder and restore engine constructors; there is no
//! ambient global handle.

pub mod memory;

pub use memory::MemoryRepository;

use crate::error::VaultResult;
use crate::models::Collection;

/// An opaque entity record: a JSON object carrying at least an `id` field
pub type Record = serde_json::Value;

/// Extract a record's durable identifier
///
/// Every record inside a backup document must carry its own id; it is what
/// makes replay idempotent.
pub fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(|v| v.as_str())
}

/// Abstract CRUD repository over entity collections
pub trait Repository {
    /// Fetch every record in a collection
    fn find_many(&self, collection: Collection) -> VaultResult<Vec<Record>>;

    /// Update a record by identifier, or insert it if absent
    fn upsert(&self, collection: Collection, id: &str, record: Record) -> VaultResult<()>;
}
