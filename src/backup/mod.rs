//! QR backup/restore codec
//!
//! The end-to-end protocol: serialize a snapshot of cards and settings,
//! compress, derive a key from the 4-digit password, encrypt, and frame the
//! result as QR-sized text, optionally split across multiple parts. Restore
//! is the strict inverse with a validation gate at every stage.
//!
//! All operations here are pure, synchronous transformations; the only
//! external dependency is the OS random source for salt and IV.

pub mod codec;
pub mod container;
pub mod envelope;
pub mod multipart;

pub use codec::{create_backup, restore_backup};
pub use container::EncryptedContainer;
pub use envelope::BackupEnvelope;
pub use multipart::{create_multi_part_backup, restore_multi_part_backup};

/// Backup format version carried in envelope and container
pub const BACKUP_VERSION: &str = "1.0";

/// Maximum characters a single QR payload may hold
///
/// QR version 40 at low error correction fits 2953 alphanumeric bytes;
/// 2900 leaves headroom for quiet-zone-averse encoders.
pub const MAX_QR_PAYLOAD: usize = 2900;
