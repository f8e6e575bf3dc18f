//! CodeMOA - Barcode wallet with encrypted QR backup
//!
//! Core library for the CodeMOA wallet: stores membership and gift-card
//! barcodes, keeps a flat settings snapshot, and packs the whole wallet
//! into password-encrypted, QR-sized backup payloads.
//!
//! # Architecture
//!
//! - `config`: paths and the user settings snapshot
//! - `error`: custom error types
//! - `models`: the card data model
//! - `storage`: JSON file storage layer
//! - `crypto`: KDF, cipher, and verification-hash primitives
//! - `backup`: the encrypted QR backup/restore codec
//! - `cli`: command handlers for the `codemoa` binary

pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{BackupError, CodemoaError};
