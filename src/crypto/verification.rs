//! Password verification hash
//!
//! A one-way digest of salt ‖ password, stored alongside the ciphertext so
//! a wrong password can be rejected before any decryption is attempted.
//! This is not the encryption key; that comes from PBKDF2.

use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};

/// Compute the base64-encoded SHA-256 of salt ‖ password
pub fn password_verification_hash(password: &str, salt: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    STANDARD.encode(hasher.finalize())
}
