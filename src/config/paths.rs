//! Path management for CodeMOA
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `CODEMOA_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/codemoa` or `~/.config/codemoa`
//! 3. Windows: `%APPDATA%\codemoa`

use std::path::PathBuf;

use crate::error::CodemoaError;

/// Manages all paths used by CodeMOA
#[derive(Debug, Clone)]
pub struct CodemoaPaths {
    /// Base directory for all CodeMOA data
    base_dir: PathBuf,
}

impl CodemoaPaths {
    /// Create a new CodemoaPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CodemoaError> {
        let base_dir = if let Ok(custom) = std::env::var("CODEMOA_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CodemoaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    /// Get the path to cards.json
    pub fn cards_file(&self) -> PathBuf {
        self.data_dir().join("cards.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), CodemoaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CodemoaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CodemoaError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CodemoaError> {
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .map_err(|_| CodemoaError::Config("Could not determine home directory".into()))
        })?;
    Ok(config_base.join("codemoa"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CodemoaError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CodemoaError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("codemoa"))
}
