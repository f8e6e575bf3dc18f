//! Backup CLI commands
//!
//! The QR payloads are text, so the CLI writes them to a file (one part per
//! line) for the caller to render; restore reads the same format back.

use std::fs;
use std::path::PathBuf;

use clap::Subcommand;

use crate::backup::{create_backup, create_multi_part_backup, restore_multi_part_backup};
use crate::backup::MAX_QR_PAYLOAD;
use crate::config::{AppSettings, CodemoaPaths};
use crate::error::{CodemoaError, CodemoaResult};
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create an encrypted backup payload
    Create {
        /// Output file (one QR payload per line)
        #[arg(short, long, default_value = "codemoa-backup.txt")]
        out: PathBuf,

        /// Split into multiple QR payloads when the wallet is too large
        #[arg(short, long)]
        multi_part: bool,

        /// Maximum characters per QR payload
        #[arg(long, default_value_t = MAX_QR_PAYLOAD)]
        max_size: usize,

        /// 4-digit backup password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Restore cards and settings from a backup payload
    Restore {
        /// Backup file (one QR payload per line)
        file: PathBuf,

        /// Keep existing cards instead of replacing the wallet
        #[arg(long)]
        merge: bool,

        /// 4-digit backup password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    storage: &Storage,
    paths: &CodemoaPaths,
    settings: &AppSettings,
    cmd: BackupCommands,
) -> CodemoaResult<()> {
    match cmd {
        BackupCommands::Create {
            out,
            multi_part,
            max_size,
            password,
        } => {
            let password = resolve_password(password, true)?;
            let cards = storage.cards.get_all()?;

            let parts = if multi_part {
                create_multi_part_backup(&cards, settings, &password, max_size)?
            } else {
                vec![create_backup(&cards, settings, &password)?]
            };

            fs::write(&out, parts.join("\n"))
                .map_err(|e| CodemoaError::Io(format!("Failed to write backup file: {}", e)))?;

            println!(
                "Backup of {} card(s) written to {} ({} payload(s))",
                cards.len(),
                out.display(),
                parts.len()
            );
        }

        BackupCommands::Restore {
            file,
            merge,
            password,
        } => {
            let password = resolve_password(password, false)?;

            let contents = fs::read_to_string(&file)
                .map_err(|e| CodemoaError::Io(format!("Failed to read backup file: {}", e)))?;
            let parts: Vec<String> = contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect();

            let envelope = restore_multi_part_backup(&parts, &password)?;

            if !merge {
                storage.cards.delete_all()?;
            }
            let restored = envelope.cards.len();
            storage.cards.insert_many(envelope.cards)?;
            storage.save_all()?;
            envelope.settings.save(paths)?;

            println!(
                "Restored {} card(s) and settings from backup created {}",
                restored,
                envelope.created_at.format("%Y-%m-%d %H:%M UTC")
            );
        }
    }

    Ok(())
}

/// Take the password from the flag or prompt for it
fn resolve_password(flag: Option<String>, confirm: bool) -> CodemoaResult<String> {
    if let Some(password) = flag {
        return Ok(password);
    }

    let password = rpassword::prompt_password("Backup password (4 digits): ")
        .map_err(|e| CodemoaError::Io(format!("Failed to read password: {}", e)))?;

    if confirm {
        let again = rpassword::prompt_password("Confirm password: ")
            .map_err(|e| CodemoaError::Io(format!("Failed to read password: {}", e)))?;
        if password != again {
            return Err(CodemoaError::Config("Passwords do not match".into()));
        }
    }

    Ok(password)
}
