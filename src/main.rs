use anyhow::Result;
use clap::{Parser, Subcommand};

use codemoa::cli::{handle_backup_command, handle_card_command, BackupCommands, CardCommands};
use codemoa::config::{paths::CodemoaPaths, settings::AppSettings};
use codemoa::storage::Storage;

#[derive(Parser)]
#[command(
    name = "codemoa",
    version,
    about = "Barcode wallet for membership and gift cards",
    long_about = "CodeMOA stores membership and gift-card barcodes and packs the \
                  whole wallet into password-encrypted, QR-sized backup payloads."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Card management commands
    #[command(subcommand)]
    Card(CardCommands),

    /// Encrypted QR backup commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = CodemoaPaths::new()?;
    let settings = AppSettings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Card(cmd)) => {
            handle_card_command(&storage, settings.expiry_notification_days, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&storage, &paths, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("CodeMOA Configuration");
            println!("=====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!();
            println!("Settings:");
            println!("  Theme: {:?}", settings.theme_mode);
            println!("  Language: {}", settings.language);
            println!("  Expiry notifications: {} ({} days)",
                settings.expiry_notification_enabled, settings.expiry_notification_days);
            println!("  App lock: {}", settings.app_lock_enabled);
        }
        None => {
            println!("CodeMOA - Barcode wallet with encrypted QR backup");
            println!();
            println!("Run 'codemoa --help' for usage information.");
        }
    }

    Ok(())
}
