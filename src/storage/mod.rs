//! Storage layer for snapvault
//!
//! Provides the durable artifact store with atomic writes, key siblings,
//! and directory enumeration.

pub mod artifacts;
pub mod file_io;

pub use artifacts::{ArtifactEntry, ArtifactStore};
pub use file_io::{read_bytes, write_bytes_atomic};
