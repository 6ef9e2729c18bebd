//! Path management for the artifact store
//!
//! Provides XDG-compliant path resolution for where backup artifacts and
//! their companion key files live on disk.
//!
//! ## Path Resolution Order
//!
//! 1. `SNAPVAULT_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_DATA_HOME/snapvault` or `~/.local/share/snapvault`
//! 3. Windows: `%APPDATA%\snapvault`

use std::path::PathBuf;

use crate::error::VaultError;

/// Manages all paths used by the artifact store
#[derive(Debug, Clone)]
pub struct StorePaths {
    /// Base directory for all snapvault data
    base_dir: PathBuf,
}

impl StorePaths {
    /// Create a new StorePaths instance
    ///
    /// Path resolution:
    /// 1. `SNAPVAULT_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_DATA_HOME/snapvault` or `~/.local/share/snapvault`
    /// 3. Windows: `%APPDATA%\snapvault`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, VaultError> {
        let base_dir = if let Ok(custom) = std::env::var("SNAPVAULT_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create StorePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the directory holding backup artifacts and key files
    pub fn artifact_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), VaultError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| VaultError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.artifact_dir())
            .map_err(|e| VaultError::Io(format!("Failed to create artifact directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, VaultError> {
    // Unix (Linux/macOS): Use XDG_DATA_HOME if set, otherwise ~/.local/share
    let data_base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".local").join("share"))
        })
        .map_err(|_| VaultError::Io("Cannot determine home directory".to_string()))?;

    Ok(data_base.join("snapvault"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, VaultError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| VaultError::Io("Cannot determine APPDATA directory".to_string()))?;

    Ok(PathBuf::from(appdata).join("snapvault"))
}
