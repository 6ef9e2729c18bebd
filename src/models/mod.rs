//! Core data models for snapvault
//!
//! Defines the entity collections a backup can include, the typed backup
//! configuration, the on-disk backup document, and the catalog-facing
//! metadata summary.

pub mod collection;
pub mod config;
pub mod document;
pub mod metadata;

pub use collection::Collection;
pub use config::BackupConfig;
pub use document::{BackupDocument, DocumentMetadata, SCHEMA_VERSION};
pub use metadata::BackupMetadata;
