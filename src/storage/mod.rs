//! Storage layer for CodeMOA
//!
//! JSON file storage with atomic writes. The backup codec never touches
//! this layer directly; it receives card lists and settings as plain values
//! and hands them back the same way.

pub mod cards;
pub mod file_io;

pub use cards::CardStore;
pub use file_io::{read_json, write_json_atomic};

use crate::config::paths::CodemoaPaths;
use crate::error::CodemoaError;

/// Main storage coordinator
pub struct Storage {
    paths: CodemoaPaths,
    pub cards: CardStore,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: CodemoaPaths) -> Result<Self, CodemoaError> {
        paths.ensure_directories()?;

        Ok(Self {
            cards: CardStore::new(paths.cards_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &CodemoaPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), CodemoaError> {
        self.cards.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), CodemoaError> {
        self.cards.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CodemoaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.cards.count().unwrap(), 0);
    }
}
