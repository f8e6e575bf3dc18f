//! Backup envelope
//!
//! The plaintext structure that gets compressed and encrypted: the full
//! card list, the settings snapshot, and the password verification hash.
//! It exists only transiently in memory on both the create and restore
//! paths; it is never persisted as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AppSettings;
use crate::models::Card;

use super::BACKUP_VERSION;

/// Plaintext backup snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEnvelope {
    /// Backup format version
    #[serde(default = "default_version")]
    pub version: String,

    /// When the backup was created, epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    /// All cards in the wallet
    pub cards: Vec<Card>,

    /// Settings snapshot
    pub settings: AppSettings,

    /// base64(SHA-256(salt ‖ password)), duplicated in the container
    pub password_hash: String,
}

fn default_version() -> String {
    BACKUP_VERSION.to_string()
}

impl BackupEnvelope {
    /// Build a fresh envelope stamped with the current time
    pub fn new(cards: Vec<Card>, settings: AppSettings, password_hash: String) -> Self {
        Self {
            version: BACKUP_VERSION.to_string(),
            created_at: Utc::now(),
            cards,
            settings,
            password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_envelope() {
        let envelope = BackupEnvelope::new(Vec::new(), AppSettings::default(), "hash".into());
        assert_eq!(envelope.version, BACKUP_VERSION);
        assert!(envelope.cards.is_empty());
        assert_eq!(envelope.password_hash, "hash");
    }

    #[test]
    fn test_version_defaults_when_absent() {
        let json = r#"{"createdAt": 1700000000000, "cards": [], "settings": {}, "passwordHash": "h"}"#;
        let envelope: BackupEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.version, BACKUP_VERSION);
    }
}
