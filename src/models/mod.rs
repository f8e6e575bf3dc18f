//! Core data models for CodeMOA

pub mod card;
pub mod ids;

pub use card::{BarcodeFormat, Card, CardDetails, CardKind, CardValidationError};
pub use ids::CardId;
