//! Single-payload backup create/restore
//!
//! Create: salt → verification hash → envelope JSON → gzip → PBKDF2 key →
//! IV → AES-256-CBC → container → outer base64. Restore runs the inverse
//! with a gate at every stage; no step is retried and no partial envelope
//! is ever returned.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::config::AppSettings;
use crate::crypto::{self, cipher, derive_key, password_verification_hash};
use crate::error::{BackupError, BackupResult};
use crate::models::Card;

use super::container::EncryptedContainer;
use super::envelope::BackupEnvelope;
use super::MAX_QR_PAYLOAD;

/// KDF salt length in bytes
const SALT_SIZE: usize = 16;

/// Check the 4-digit PIN shape
pub(super) fn is_valid_password(password: &str) -> bool {
    password.len() == 4 && password.chars().all(|c| c.is_ascii_digit())
}

/// Create a single-payload encrypted backup
///
/// Fails with `PayloadTooLarge` if the encoded result exceeds the QR
/// transport limit; callers that can render several codes should use
/// [`super::create_multi_part_backup`] instead.
pub fn create_backup(
    cards: &[Card],
    settings: &AppSettings,
    password: &str,
) -> BackupResult<String> {
    let payload = encode_backup(cards, settings, password)?;

    if payload.len() > MAX_QR_PAYLOAD {
        return Err(BackupError::PayloadTooLarge {
            size: payload.len(),
            limit: MAX_QR_PAYLOAD,
        });
    }

    Ok(payload)
}

/// Run the full create pipeline without the size gate
pub(super) fn encode_backup(
    cards: &[Card],
    settings: &AppSettings,
    password: &str,
) -> BackupResult<String> {
    if !is_valid_password(password) {
        return Err(BackupError::InvalidPassword);
    }

    let salt: [u8; SALT_SIZE] = crypto::random_bytes();
    let password_hash = password_verification_hash(password, &salt);

    let envelope = BackupEnvelope::new(cards.to_vec(), settings.clone(), password_hash.clone());
    let json = serde_json::to_string(&envelope).map_err(|e| {
        BackupError::MalformedPayload(format!("envelope encoding failed: {}", e))
    })?;

    let compressed = compress(json.as_bytes())?;

    let key = derive_key(password, &salt);
    let iv: [u8; cipher::IV_SIZE] = crypto::random_bytes();
    let ciphertext = cipher::encrypt(&compressed, &key, &iv);

    EncryptedContainer::new(&ciphertext, &salt, &iv, password_hash).encode()
}

/// Restore a backup envelope from a single payload
pub fn restore_backup(payload: &str, password: &str) -> BackupResult<BackupEnvelope> {
    if !is_valid_password(password) {
        return Err(BackupError::InvalidPassword);
    }

    let container = EncryptedContainer::decode(payload)?;
    let salt = container.decode_salt()?;

    // Reject a wrong password before touching the ciphertext
    if password_verification_hash(password, &salt) != container.password_hash {
        return Err(BackupError::WrongPassword);
    }

    let key = derive_key(password, &salt);
    let iv = container.decode_iv()?;
    let ciphertext = container.decode_ciphertext()?;

    let compressed = cipher::decrypt(&ciphertext, &key, &iv)?;
    let json = decompress(&compressed)?;

    serde_json::from_slice(&json)
        .map_err(|e| BackupError::CorruptData(format!("invalid envelope: {}", e)))
}

/// Gzip the serialized envelope
fn compress(data: &[u8]) -> BackupResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|e| BackupError::CorruptData(format!("compression failed: {}", e)))
}

/// Inverse of [`compress`]; the gzip CRC catches most transport corruption
fn decompress(data: &[u8]) -> BackupResult<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| BackupError::CorruptData(format!("decompression failed: {}", e)))?;
    Ok(out)
}


#[cfg(test)]
mod tests {
    use super::test_fixtures::{bulky_cards, sample_gift_card, sample_membership};
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use crate::config::ThemeMode;

    fn sample_cards() -> Vec<Card> {
        vec![sample_membership("Gym"), sample_gift_card("Coffee Voucher")]
    }

    fn sample_settings() -> AppSettings {
        let mut settings = AppSettings::default();
        settings.theme_mode = ThemeMode::Dark;
        settings.language = "ko".to_string();
        settings
    }

    #[test]
    fn test_round_trip() {
        let cards = sample_cards();
        let settings = sample_settings();

        let payload = create_backup(&cards, &settings, "1234").unwrap();
        let envelope = restore_backup(&payload, "1234").unwrap();

        assert_eq!(envelope.cards, cards);
        assert_eq!(envelope.settings, settings);
        assert_eq!(envelope.version, super::super::BACKUP_VERSION);
    }

    #[test]
    fn test_empty_wallet_round_trip() {
        let payload = create_backup(&[], &AppSettings::default(), "0000").unwrap();
        let envelope = restore_backup(&payload, "0000").unwrap();
        assert!(envelope.cards.is_empty());
    }

    #[test]
    fn test_wrong_password_rejected_before_decryption() {
        let payload = create_backup(&sample_cards(), &sample_settings(), "1234").unwrap();
        let err = restore_backup(&payload, "5678").unwrap_err();
        assert_eq!(err, BackupError::WrongPassword);
    }

    #[test]
    fn test_invalid_password_shapes() {
        let settings = AppSettings::default();
        assert_eq!(
            create_backup(&[], &settings, "123").unwrap_err(),
            BackupError::InvalidPassword
        );
        assert_eq!(
            create_backup(&[], &settings, "12a4").unwrap_err(),
            BackupError::InvalidPassword
        );
        assert_eq!(
            create_backup(&[], &settings, "12345").unwrap_err(),
            BackupError::InvalidPassword
        );
        assert_eq!(
            restore_backup("whatever", "abcd").unwrap_err(),
            BackupError::InvalidPassword
        );
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            restore_backup("%%% not base64 %%%", "1234").unwrap_err(),
            BackupError::MalformedPayload(_)
        ));

        let not_json = STANDARD.encode(b"hello");
        assert!(matches!(
            restore_backup(&not_json, "1234").unwrap_err(),
            BackupError::MalformedPayload(_)
        ));
    }

    #[test]
    fn test_tampered_ciphertext_is_corrupt_data() {
        let payload = create_backup(&sample_cards(), &sample_settings(), "1234").unwrap();

        // Flip one byte inside the ciphertext, leaving the verification
        // hash intact so the failure happens after the password gate.
        let mut container = EncryptedContainer::decode(&payload).unwrap();
        let mut ciphertext = container.decode_ciphertext().unwrap();
        let mid = ciphertext.len() / 2;
        ciphertext[mid] ^= 0xFF;
        container.encrypted_data = STANDARD.encode(&ciphertext);
        let tampered = container.encode().unwrap();

        let err = restore_backup(&tampered, "1234").unwrap_err();
        assert!(matches!(err, BackupError::CorruptData(_)), "got {err:?}");
    }

    #[test]
    fn test_size_gate() {
        let cards = bulky_cards(80);
        let err = create_backup(&cards, &AppSettings::default(), "1234").unwrap_err();
        assert!(
            matches!(err, BackupError::PayloadTooLarge { size, limit }
                if size > limit && limit == MAX_QR_PAYLOAD),
            "got {err:?}"
        );
    }

    #[test]
    fn test_compress_decompress_content() {
        // Compare decompressed content, not compressed bytes; the gzip
        // container is not byte-deterministic across implementations.
        let data = b"codemoa codemoa codemoa".repeat(20);
        let compressed = compress(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_decompress_garbage_fails() {
        assert!(matches!(
            decompress(&[0u8; 32]).unwrap_err(),
            BackupError::CorruptData(_)
        ));
    }
}
