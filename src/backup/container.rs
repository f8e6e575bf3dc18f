//! Encrypted container — the QR wire format
//!
//! Holds the ciphertext plus everything needed to reverse it: salt, IV, and
//! the in-the-clear password verification hash. The container serializes to
//! JSON and is then base64-encoded whole, so QR encoders never see raw JSON
//! control characters.
//!
//! Wire format: `base64( utf8( JSON{ version, createdAt, encryptedData,
//! salt, iv, passwordHash } ) )` with each binary field itself base64.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::cipher::IV_SIZE;
use crate::error::{BackupError, BackupResult};

use super::BACKUP_VERSION;

/// Encrypted backup container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedContainer {
    /// Backup format version
    #[serde(default = "default_version")]
    pub version: String,

    /// When the backup was created, epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    /// AES-256-CBC ciphertext, base64
    pub encrypted_data: String,

    /// KDF salt, base64
    pub salt: String,

    /// CBC initialization vector, base64
    pub iv: String,

    /// base64(SHA-256(salt ‖ password)), checked before decryption
    pub password_hash: String,
}

fn default_version() -> String {
    BACKUP_VERSION.to_string()
}

impl EncryptedContainer {
    /// Assemble a container from raw cipher output
    pub fn new(ciphertext: &[u8], salt: &[u8], iv: &[u8], password_hash: String) -> Self {
        Self {
            version: BACKUP_VERSION.to_string(),
            created_at: Utc::now(),
            encrypted_data: STANDARD.encode(ciphertext),
            salt: STANDARD.encode(salt),
            iv: STANDARD.encode(iv),
            password_hash,
        }
    }

    /// Serialize to the outer wire text: base64 of the JSON body
    pub fn encode(&self) -> BackupResult<String> {
        let json = serde_json::to_string(self).map_err(|e| {
            BackupError::MalformedPayload(format!("container encoding failed: {}", e))
        })?;
        Ok(STANDARD.encode(json.as_bytes()))
    }

    /// Parse the outer wire text back into a container
    pub fn decode(payload: &str) -> BackupResult<Self> {
        let json_bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| BackupError::MalformedPayload(format!("invalid base64: {}", e)))?;

        let json = String::from_utf8(json_bytes)
            .map_err(|e| BackupError::MalformedPayload(format!("invalid UTF-8: {}", e)))?;

        serde_json::from_str(&json)
            .map_err(|e| BackupError::MalformedPayload(format!("invalid container JSON: {}", e)))
    }

    /// Decode the salt field
    pub fn decode_salt(&self) -> BackupResult<Vec<u8>> {
        STANDARD
            .decode(&self.salt)
            .map_err(|e| BackupError::MalformedPayload(format!("invalid salt encoding: {}", e)))
    }

    /// Decode the IV field, enforcing the CBC block size
    pub fn decode_iv(&self) -> BackupResult<[u8; IV_SIZE]> {
        let bytes = STANDARD
            .decode(&self.iv)
            .map_err(|e| BackupError::MalformedPayload(format!("invalid IV encoding: {}", e)))?;

        bytes.try_into().map_err(|bytes: Vec<u8>| {
            BackupError::MalformedPayload(format!(
                "invalid IV size: expected {}, got {}",
                IV_SIZE,
                bytes.len()
            ))
        })
    }

    /// Decode the ciphertext field
    pub fn decode_ciphertext(&self) -> BackupResult<Vec<u8>> {
        STANDARD.decode(&self.encrypted_data).map_err(|e| {
            BackupError::MalformedPayload(format!("invalid ciphertext encoding: {}", e))
        })
    }
}
