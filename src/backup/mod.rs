//! Backup engine for snapvault
//!
//! - `builder`: assembles, optionally seals, and persists backup artifacts
//! - `restore`: replays artifacts back into a repository with idempotent
//!   upserts and partial-failure tolerance
//! - `catalog`: lists stored backups and aggregates summary statistics

pub mod builder;
pub mod catalog;
pub mod restore;

pub use builder::SnapshotBuilder;
pub use catalog::{BackupCatalog, BackupStats};
pub use restore::{RestoreEngine, RestoreReport};
