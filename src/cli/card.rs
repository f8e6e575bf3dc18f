//! Card CLI commands

use clap::Subcommand;

use crate::error::{CodemoaError, CodemoaResult};
use crate::models::{BarcodeFormat, Card, CardDetails, CardId, CardKind};
use crate::storage::Storage;

/// Card subcommands
#[derive(Subcommand)]
pub enum CardCommands {
    /// Add a new card
    Add {
        /// Display name
        name: String,
        /// Issuing company
        company: String,
        /// Barcode payload
        barcode: String,
        /// Barcode format (qr, code128, code39, ean13, ean8)
        #[arg(short, long, default_value = "qr")]
        format: String,
        /// Card kind (membership or gift)
        #[arg(short, long, default_value = "membership")]
        kind: String,
    },

    /// List cards
    List {
        /// Filter by kind (membership or gift)
        #[arg(short, long)]
        kind: Option<String>,
        /// Only show favorites
        #[arg(short, long)]
        favorites: bool,
        /// Only show gift cards expiring within the notification window
        #[arg(short, long)]
        expiring: bool,
    },

    /// Remove a card
    Remove {
        /// Card ID
        id: String,
    },

    /// Mark or unmark a card as favorite
    Favorite {
        /// Card ID
        id: String,
        /// Remove the favorite flag instead
        #[arg(long)]
        unset: bool,
    },

    /// Mark or unmark a gift card as used
    Use {
        /// Card ID
        id: String,
        /// Remove the used flag instead
        #[arg(long)]
        unset: bool,
    },
}

/// Handle a card command
pub fn handle_card_command(
    storage: &Storage,
    expiry_threshold_days: u32,
    cmd: CardCommands,
) -> CodemoaResult<()> {
    match cmd {
        CardCommands::Add {
            name,
            company,
            barcode,
            format,
            kind,
        } => {
            let format = BarcodeFormat::parse(&format)
                .ok_or_else(|| CodemoaError::Config(format!("Unknown barcode format: {}", format)))?;
            let kind = CardKind::parse(&kind)
                .ok_or_else(|| CodemoaError::Config(format!("Unknown card kind: {}", kind)))?;

            let details = match kind {
                CardKind::Membership => CardDetails::membership(),
                CardKind::GiftCard => CardDetails::gift_card(),
            };

            let card = Card::new(name, company, barcode, format, details);
            card.validate()
                .map_err(|e| CodemoaError::Config(e.to_string()))?;

            println!("Added {} [{}]", card, card.id);
            storage.cards.upsert(card)?;
            storage.save_all()?;
        }

        CardCommands::List {
            kind,
            favorites,
            expiring,
        } => {
            let cards = if expiring {
                storage.cards.get_expiring(i64::from(expiry_threshold_days))?
            } else if favorites {
                storage.cards.get_favorites()?
            } else if let Some(kind) = kind {
                let kind = CardKind::parse(&kind)
                    .ok_or_else(|| CodemoaError::Config(format!("Unknown card kind: {}", kind)))?;
                storage.cards.get_by_kind(kind)?
            } else {
                storage.cards.get_all()?
            };

            if cards.is_empty() {
                println!("No cards found.");
                return Ok(());
            }

            for card in &cards {
                let star = if card.is_favorite { "*" } else { " " };
                let expiry = match card.days_until_expiry() {
                    Some(days) if days < 0 => " (expired)".to_string(),
                    Some(days) => format!(" (expires in {} days)", days),
                    None => String::new(),
                };
                println!(
                    "{} {}  {} - {} [{}]{}",
                    star, card.id, card.name, card.company, card.barcode_format, expiry
                );
            }
            println!();
            println!("Total: {} card(s)", cards.len());
        }

        CardCommands::Remove { id } => {
            let id = parse_card_id(&id)?;
            if storage.cards.delete(id)? {
                storage.save_all()?;
                println!("Removed card {}", id);
            } else {
                return Err(CodemoaError::card_not_found(id.to_string()));
            }
        }

        CardCommands::Favorite { id, unset } => {
            let id = parse_card_id(&id)?;
            storage.cards.set_favorite(id, !unset)?;
            storage.save_all()?;
            println!(
                "Card {} {} favorites",
                id,
                if unset { "removed from" } else { "added to" }
            );
        }

        CardCommands::Use { id, unset } => {
            let id = parse_card_id(&id)?;
            storage.cards.set_used(id, !unset)?;
            storage.save_all()?;
            println!(
                "Card {} marked as {}",
                id,
                if unset { "unused" } else { "used" }
            );
        }
    }

    Ok(())
}

fn parse_card_id(s: &str) -> CodemoaResult<CardId> {
    CardId::parse(s).map_err(|_| CodemoaError::Config(format!("Invalid card ID: {}", s)))
}
