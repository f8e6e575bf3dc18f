//! Card repository for JSON storage
//!
//! Manages loading and saving cards to cards.json. Queries mirror what the
//! UI screens need: all cards, favorites, by kind, and gift cards nearing
//! expiry.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::CodemoaError;
use crate::models::{Card, CardId, CardKind};

use super::file_io::{read_json, write_json_atomic};

/// Serializable card data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CardData {
    cards: Vec<Card>,
}

/// Repository for card persistence
pub struct CardStore {
    path: PathBuf,
    data: RwLock<HashMap<CardId, Card>>,
}

impl CardStore {
    /// Create a new card store
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load cards from disk
    pub fn load(&self) -> Result<(), CodemoaError> {
        let file_data: CardData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| CodemoaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for card in file_data.cards {
            data.insert(card.id, card);
        }

        Ok(())
    }

    /// Save cards to disk
    pub fn save(&self) -> Result<(), CodemoaError> {
        let data = self
            .data
            .read()
            .map_err(|e| CodemoaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = CardData {
            cards: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a card by ID
    pub fn get(&self, id: CardId) -> Result<Option<Card>, CodemoaError> {
        let data = self
            .data
            .read()
            .map_err(|e| CodemoaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all cards, newest first
    pub fn get_all(&self) -> Result<Vec<Card>, CodemoaError> {
        let data = self
            .data
            .read()
            .map_err(|e| CodemoaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut cards: Vec<_> = data.values().cloned().collect();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.name.cmp(&b.name)));
        Ok(cards)
    }

    /// Get all favorite cards
    pub fn get_favorites(&self) -> Result<Vec<Card>, CodemoaError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|c| c.is_favorite).collect())
    }

    /// Get all cards of one kind
    pub fn get_by_kind(&self, kind: CardKind) -> Result<Vec<Card>, CodemoaError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|c| c.kind() == kind).collect())
    }

    /// Get unexpired gift cards expiring within `threshold_days`
    pub fn get_expiring(&self, threshold_days: i64) -> Result<Vec<Card>, CodemoaError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|c| c.is_expiring_soon(threshold_days))
            .collect())
    }

    /// Insert or update a card
    pub fn upsert(&self, card: Card) -> Result<(), CodemoaError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CodemoaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(card.id, card);
        Ok(())
    }

    /// Insert many cards at once (used by backup restore)
    pub fn insert_many(&self, cards: Vec<Card>) -> Result<(), CodemoaError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CodemoaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        for card in cards {
            data.insert(card.id, card);
        }
        Ok(())
    }

    /// Delete a card, returning whether it existed
    pub fn delete(&self, id: CardId) -> Result<bool, CodemoaError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CodemoaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Delete all cards
    pub fn delete_all(&self) -> Result<(), CodemoaError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CodemoaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        Ok(())
    }

    /// Set the favorite flag on a card
    pub fn set_favorite(&self, id: CardId, favorite: bool) -> Result<(), CodemoaError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CodemoaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.get_mut(&id) {
            Some(card) => {
                card.set_favorite(favorite);
                Ok(())
            }
            None => Err(CodemoaError::card_not_found(id.to_string())),
        }
    }

    /// Set the used flag on a gift card
    pub fn set_used(&self, id: CardId, used: bool) -> Result<(), CodemoaError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CodemoaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.get_mut(&id) {
            Some(card) => {
                card.set_used(used);
                Ok(())
            }
            None => Err(CodemoaError::card_not_found(id.to_string())),
        }
    }

    /// Number of stored cards
    pub fn count(&self) -> Result<usize, CodemoaError> {
        let data = self
            .data
            .read()
            .map_err(|e| CodemoaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
