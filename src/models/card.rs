//! Card model
//!
//! A card is either a membership card or a gift card. The two kinds share
//! the common barcode fields; kind-specific data lives in the `CardDetails`
//! sum type, so a membership card cannot carry an expiry date by
//! construction. On the wire the details are flattened and tagged with
//! `cardType`, keeping the serialized card a single flat JSON object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CardId;

/// Default display color for membership cards
const MEMBERSHIP_COLOR: &str = "#6750A4";
/// Default display color for gift cards
const GIFT_CARD_COLOR: &str = "#FF6B6B";

/// Barcode symbology of a stored card
///
/// Serde names match the wire enum of existing backups, so they are spelled
/// out explicitly rather than derived from the variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarcodeFormat {
    #[serde(rename = "QR_CODE")]
    QrCode,
    #[serde(rename = "CODE_128")]
    Code128,
    #[serde(rename = "CODE_39")]
    Code39,
    #[serde(rename = "EAN_13")]
    Ean13,
    #[serde(rename = "EAN_8")]
    Ean8,
}

impl BarcodeFormat {
    /// Parse a barcode format from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "qr" | "qrcode" => Some(Self::QrCode),
            "code128" => Some(Self::Code128),
            "code39" => Some(Self::Code39),
            "ean13" => Some(Self::Ean13),
            "ean8" => Some(Self::Ean8),
            _ => None,
        }
    }
}

impl Default for BarcodeFormat {
    fn default() -> Self {
        Self::QrCode
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QrCode => write!(f, "QR"),
            Self::Code128 => write!(f, "Code 128"),
            Self::Code39 => write!(f, "Code 39"),
            Self::Ean13 => write!(f, "EAN-13"),
            Self::Ean8 => write!(f, "EAN-8"),
        }
    }
}

/// Category of a card, without the kind-specific payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    Membership,
    GiftCard,
}

impl CardKind {
    /// Parse a card kind from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "membership" | "member" => Some(Self::Membership),
            "giftcard" | "gift" => Some(Self::GiftCard),
            _ => None,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Membership => write!(f, "Membership"),
            Self::GiftCard => write!(f, "Gift Card"),
        }
    }
}

/// Kind-specific card data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cardType", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all_fields = "camelCase")]
pub enum CardDetails {
    /// Membership card fields
    Membership {
        #[serde(default)]
        membership_number: Option<String>,
        #[serde(default)]
        benefits: Option<String>,
        #[serde(default)]
        tier_level: Option<String>,
    },
    /// Gift card fields
    GiftCard {
        /// Monetary value, kept as the user-entered string
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        category: Option<String>,
        /// Expiry as epoch milliseconds, absent for cards that never expire
        #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
        expiry_date: Option<DateTime<Utc>>,
        #[serde(default)]
        is_used: bool,
    },
}

impl CardDetails {
    /// Empty membership details
    pub fn membership() -> Self {
        Self::Membership {
            membership_number: None,
            benefits: None,
            tier_level: None,
        }
    }

    /// Empty gift card details
    pub fn gift_card() -> Self {
        Self::GiftCard {
            value: None,
            category: None,
            expiry_date: None,
            is_used: false,
        }
    }

    /// The kind tag for these details
    pub fn kind(&self) -> CardKind {
        match self {
            Self::Membership { .. } => CardKind::Membership,
            Self::GiftCard { .. } => CardKind::GiftCard,
        }
    }
}

/// A stored membership or gift card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier
    pub id: CardId,

    /// Display name (e.g., "Coffee Club")
    pub name: String,

    /// Issuing company
    pub company: String,

    /// Raw barcode payload
    pub barcode_data: String,

    /// Barcode symbology
    pub barcode_format: BarcodeFormat,

    /// Display color as a hex string
    pub color: String,

    /// When the card was added
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    /// Whether the card is pinned to the favorites view
    #[serde(default)]
    pub is_favorite: bool,

    /// Kind-specific fields, flattened into the card object on the wire
    #[serde(flatten)]
    pub details: CardDetails,
}

impl Card {
    /// Create a new card with the default color for its kind
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        barcode_data: impl Into<String>,
        barcode_format: BarcodeFormat,
        details: CardDetails,
    ) -> Self {
        let color = match details.kind() {
            CardKind::Membership => MEMBERSHIP_COLOR,
            CardKind::GiftCard => GIFT_CARD_COLOR,
        };
        Self {
            id: CardId::new(),
            name: name.into(),
            company: company.into(),
            barcode_data: barcode_data.into(),
            barcode_format,
            color: color.to_string(),
            created_at: Utc::now(),
            is_favorite: false,
            details,
        }
    }

    /// The card's kind tag
    pub fn kind(&self) -> CardKind {
        self.details.kind()
    }

    /// Toggle the favorite flag
    pub fn set_favorite(&mut self, favorite: bool) {
        self.is_favorite = favorite;
    }

    /// Mark a gift card as used or unused; no-op for memberships
    pub fn set_used(&mut self, used: bool) {
        if let CardDetails::GiftCard { is_used, .. } = &mut self.details {
            *is_used = used;
        }
    }

    /// Gift card expiry timestamp, if any
    pub fn expiry_date(&self) -> Option<DateTime<Utc>> {
        match &self.details {
            CardDetails::GiftCard { expiry_date, .. } => *expiry_date,
            CardDetails::Membership { .. } => None,
        }
    }

    /// Whole days until the gift card expires, negative once past
    pub fn days_until_expiry(&self) -> Option<i64> {
        self.days_until_expiry_at(Utc::now())
    }

    /// Days until expiry relative to a given instant
    pub fn days_until_expiry_at(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expiry_date().map(|expiry| (expiry - now).num_days())
    }

    /// Whether the card expires within `threshold_days` (and has not already)
    pub fn is_expiring_soon(&self, threshold_days: i64) -> bool {
        matches!(self.days_until_expiry(), Some(days) if days >= 0 && days <= threshold_days)
    }

    /// Whether the expiry date has passed
    pub fn is_expired(&self) -> bool {
        matches!(self.days_until_expiry(), Some(days) if days < 0)
    }

    /// Validate the card
    pub fn validate(&self) -> Result<(), CardValidationError> {
        if self.name.trim().is_empty() {
            return Err(CardValidationError::EmptyName);
        }
        if self.barcode_data.trim().is_empty() {
            return Err(CardValidationError::EmptyBarcode);
        }
        Ok(())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind())
    }
}

/// Validation errors for cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    EmptyName,
    EmptyBarcode,
}

impl fmt::Display for CardValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Card name cannot be empty"),
            Self::EmptyBarcode => write!(f, "Barcode data cannot be empty"),
        }
    }
}

impl std::error::Error for CardValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn gift_card_expiring(days_from_now: i64) -> Card {
        let mut card = Card::new(
            "Coffee Voucher",
            "Mega Coffee",
            "8801234567890",
            BarcodeFormat::Ean13,
            CardDetails::gift_card(),
        );
        if let CardDetails::GiftCard { expiry_date, .. } = &mut card.details {
            *expiry_date = Some(Utc::now() + Duration::days(days_from_now));
        }
        card
    }

    #[test]
    fn test_new_card_defaults() {
        let card = Card::new(
            "Gym",
            "FitLife",
            "1234",
            BarcodeFormat::Code128,
            CardDetails::membership(),
        );
        assert_eq!(card.kind(), CardKind::Membership);
        assert_eq!(card.color, MEMBERSHIP_COLOR);
        assert!(!card.is_favorite);

        let gift = Card::new(
            "Voucher",
            "Shop",
            "5678",
            BarcodeFormat::QrCode,
            CardDetails::gift_card(),
        );
        assert_eq!(gift.color, GIFT_CARD_COLOR);
    }

    #[test]
    fn test_membership_has_no_expiry() {
        let card = Card::new(
            "Gym",
            "FitLife",
            "1234",
            BarcodeFormat::Code39,
            CardDetails::membership(),
        );
        assert_eq!(card.days_until_expiry(), None);
        assert!(!card.is_expired());
        assert!(!card.is_expiring_soon(7));
    }

    #[test]
    fn test_expiry_classification() {
        let soon = gift_card_expiring(3);
        assert!(soon.is_expiring_soon(7));
        assert!(!soon.is_expired());

        let far = gift_card_expiring(30);
        assert!(!far.is_expiring_soon(7));
        assert!(!far.is_expired());

        let past = gift_card_expiring(-2);
        assert!(past.is_expired());
        assert!(!past.is_expiring_soon(7));
    }

    #[test]
    fn test_set_used_only_affects_gift_cards() {
        let mut membership = Card::new(
            "Gym",
            "FitLife",
            "1234",
            BarcodeFormat::Code128,
            CardDetails::membership(),
        );
        membership.set_used(true);
        assert_eq!(membership.details, CardDetails::membership());

        let mut gift = gift_card_expiring(10);
        gift.set_used(true);
        assert!(matches!(
            gift.details,
            CardDetails::GiftCard { is_used: true, .. }
        ));
    }

    #[test]
    fn test_wire_format_is_flat_and_tagged() {
        let card = gift_card_expiring(10);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["cardType"], "GIFT_CARD");
        assert_eq!(json["barcodeData"], "8801234567890");
        assert_eq!(json["barcodeFormat"], "EAN_13");
        assert!(json["expiryDate"].is_i64());
        // No nested details object
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let card = gift_card_expiring(10);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card.id, back.id);
        assert_eq!(card.kind(), back.kind());
        // Millisecond serde truncates sub-millisecond precision
        assert_eq!(
            card.created_at.timestamp_millis(),
            back.created_at.timestamp_millis()
        );
    }

    #[test]
    fn test_barcode_format_parse() {
        assert_eq!(BarcodeFormat::parse("qr"), Some(BarcodeFormat::QrCode));
        assert_eq!(BarcodeFormat::parse("CODE-128"), Some(BarcodeFormat::Code128));
        assert_eq!(BarcodeFormat::parse("ean_13"), Some(BarcodeFormat::Ean13));
        assert_eq!(BarcodeFormat::parse("pdf417"), None);
    }

    #[test]
    fn test_validation() {
        let mut card = Card::new(
            "Gym",
            "FitLife",
            "1234",
            BarcodeFormat::Code128,
            CardDetails::membership(),
        );
        assert!(card.validate().is_ok());

        card.name = "  ".into();
        assert_eq!(card.validate(), Err(CardValidationError::EmptyName));

        card.name = "Gym".into();
        card.barcode_data = String::new();
        assert_eq!(card.validate(), Err(CardValidationError::EmptyBarcode));
    }
}
