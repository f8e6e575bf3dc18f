//! AES-256-CBC encryption/decryption with PKCS#7 padding
//!
//! CBC with an explicit IV is what the backup wire format carries; integrity
//! comes from the gzip checksum and envelope parse on the restore path, not
//! from the cipher itself.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::{BackupError, BackupResult};

use super::DerivedKey;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Size of the CBC initialization vector in bytes
pub const IV_SIZE: usize = 16;

/// Encrypt plaintext with AES-256-CBC/PKCS#7
pub fn encrypt(plaintext: &[u8], key: &DerivedKey, iv: &[u8; IV_SIZE]) -> Vec<u8> {
    Aes256CbcEnc::new(key.as_bytes().into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt ciphertext with AES-256-CBC/PKCS#7
///
/// An unpadding failure surfaces as `CorruptData`; with CBC a wrong key that
/// slipped past the verification hash is indistinguishable from bit-level
/// corruption.
pub fn decrypt(ciphertext: &[u8], key: &DerivedKey, iv: &[u8; IV_SIZE]) -> BackupResult<Vec<u8>> {
    Aes256CbcDec::new(key.as_bytes().into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| BackupError::CorruptData("decryption failed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::derive_key;

    fn test_key() -> DerivedKey {
        derive_key("1234", &[9u8; 16])
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let key = test_key();
        let iv = [5u8; IV_SIZE];
        let plaintext = b"hello codemoa";

        let ciphertext = encrypt(plaintext, &key, &iv);
        assert_ne!(&ciphertext[..], &plaintext[..]);

        let decrypted = decrypt(&ciphertext, &key, &iv).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_empty_plaintext() {
        let key = test_key();
        let iv = [5u8; IV_SIZE];

        // PKCS#7 pads an empty input to one full block
        let ciphertext = encrypt(b"", &key, &iv);
        assert_eq!(ciphertext.len(), 16);
        assert_eq!(decrypt(&ciphertext, &key, &iv).unwrap(), b"");
    }

    #[test]
    fn test_wrong_key_fails_or_garbles() {
        let iv = [5u8; IV_SIZE];
        let ciphertext = encrypt(b"hello codemoa", &test_key(), &iv);

        let wrong = derive_key("4321", &[9u8; 16]);
        match decrypt(&ciphertext, &wrong, &iv) {
            // Most of the time the padding check fails outright
            Err(BackupError::CorruptData(_)) => {}
            // Rarely the garbage ends in a valid pad; it must not equal the input
            Ok(garbage) => assert_ne!(garbage, b"hello codemoa"),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let key = test_key();
        let iv = [5u8; IV_SIZE];
        let ciphertext = encrypt(b"hello codemoa", &key, &iv);

        let result = decrypt(&ciphertext[..ciphertext.len() - 1], &key, &iv);
        assert!(matches!(result, Err(BackupError::CorruptData(_))));
    }
}
