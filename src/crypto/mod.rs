//! Cryptographic primitives for the backup codec
//!
//! PBKDF2-HMAC-SHA256 key derivation, AES-256-CBC encryption, and the
//! SHA-256 password verification hash. These parameters are fixed by the
//! backup wire format; changing any of them breaks restore of existing
//! backups.

pub mod cipher;
pub mod key_derivation;
pub mod verification;

pub use cipher::{decrypt, encrypt};
pub use key_derivation::{derive_key, DerivedKey};
pub use verification::password_verification_hash;

use rand::rngs::OsRng;
use rand::RngCore;

/// Generate cryptographically random bytes (salt, IV)
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}
