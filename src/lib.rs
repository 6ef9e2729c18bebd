//! snapvault - selective backup, encryption, and restore engine
//!
//! This library snapshots a configurable subset of a multi-tenant relational
//! dataset into a portable, integrity-checked artifact, and later replays
//! such artifacts back into a live store. It is invoked by an external admin
//! surface; authentication, scheduling, and the relational store itself are
//! the caller's concern.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Artifact store path management
//! - `error`: Custom error types
//! - `models`: Collections, backup config, documents, catalog metadata
//! - `crypto`: AES-256-GCM sealing, key generation, SHA-256 checksums
//! - `storage`: Atomic-write artifact store with key siblings
//! - `repository`: The abstract CRUD interface the engine reads from and
//!   replays into
//! - `backup`: Snapshot builder, restore engine, and catalog
//!
//! # Example
//!
//! ```rust,ignore
//! use snapvault::backup::{BackupCatalog, RestoreEngine, SnapshotBuilder};
//! use snapvault::config::StorePaths;
//! use snapvault::models::BackupConfig;
//! use snapvault::storage::ArtifactStore;
//!
//! let store = ArtifactStore::new(StorePaths::new()?)?;
//! let builder = SnapshotBuilder::new(&repository, &store);
//! let metadata = builder.create_backup(BackupConfig::default(), "admin-1")?;
//!
//! let key = store.get_key(&metadata.id)?;
//! let report = RestoreEngine::new(&repository, &store)
//!     .restore(&metadata.id, key.as_ref())?;
//! ```

pub mod backup;
pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod repository;
pub mod storage;

pub use backup::{BackupCatalog, BackupStats, RestoreEngine, RestoreReport, SnapshotBuilder};
pub use error::{VaultError, VaultResult};
pub use models::{BackupConfig, BackupDocument, BackupMetadata, Collection};
