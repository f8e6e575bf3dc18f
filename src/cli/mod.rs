//! CLI command handlers
//!
//! Bridges clap argument parsing with the storage layer and the backup
//! codec.

pub mod backup;
pub mod card;

pub use backup::{handle_backup_command, BackupCommands};
pub use card::{handle_card_command, CardCommands};
