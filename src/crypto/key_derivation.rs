//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives the AES-256 key from the 4-digit backup password and a random
//! 16-byte salt. The iteration count is a fixed wire-format parameter, not
//! a tunable.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PBKDF2 iteration count, fixed by the backup wire format
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// A derived encryption key, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; 32],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

/// Derive the AES-256 key from a password and salt
pub fn derive_key(password: &str, salt: &[u8]) -> DerivedKey {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey { key }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_inputs_same_key() {
        let salt = [3u8; 16];
        assert_eq!(
            derive_key("1234", &salt).as_bytes(),
            derive_key("1234", &salt).as_bytes()
        );
    }

    #[test]
    fn test_different_password_different_key() {
        let salt = [3u8; 16];
        assert_ne!(
            derive_key("1234", &salt).as_bytes(),
            derive_key("4321", &salt).as_bytes()
        );
    }

    #[test]
    fn test_different_salt_different_key() {
        assert_ne!(
            derive_key("1234", &[1u8; 16]).as_bytes(),
            derive_key("1234", &[2u8; 16]).as_bytes()
        );
    }
}
