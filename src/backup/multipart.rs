//! Multi-part QR payload split and reassembly
//!
//! When the encoded container exceeds what one QR code can hold, it is
//! chunked into parts. Each part starts with a fixed 8-character header:
//! `"CMOA"` + total part count (2 digits) + 1-based part index (2 digits).
//! QR codes are scanned in arbitrary order, so the header is the only
//! ordering information; reassembly always follows header indices.

use std::collections::HashMap;

use crate::config::AppSettings;
use crate::error::{BackupError, BackupResult};
use crate::models::Card;

use super::codec::{encode_backup, restore_backup};
use super::envelope::BackupEnvelope;

/// Magic marker opening every part header
pub const PART_MAGIC: &str = "CMOA";

/// Total header length: magic + 2-digit total + 2-digit index
pub const PART_HEADER_LEN: usize = 8;

/// Characters reserved per part for the header
const HEADER_RESERVE: usize = 20;

/// Hard cap on part count, fixed by the 2-digit header field
pub const MAX_PARTS: usize = 99;

/// Create a backup split into QR-sized parts
///
/// Returns a single unprefixed payload when it fits within
/// `max_chunk_size`; otherwise a list of `CMOA`-headed parts, in index
/// order. More than [`MAX_PARTS`] parts fails eagerly rather than emitting
/// headers the 2-digit field cannot represent.
pub fn create_multi_part_backup(
    cards: &[Card],
    settings: &AppSettings,
    password: &str,
    max_chunk_size: usize,
) -> BackupResult<Vec<String>> {
    let payload = encode_backup(cards, settings, password)?;

    if payload.len() <= max_chunk_size {
        return Ok(vec![payload]);
    }

    if max_chunk_size <= HEADER_RESERVE {
        return Err(BackupError::MalformedPayload(format!(
            "chunk size {} leaves no room for the {}-character header reserve",
            max_chunk_size, HEADER_RESERVE
        )));
    }

    let chunk_size = max_chunk_size - HEADER_RESERVE;
    let total = payload.len().div_ceil(chunk_size);
    if total > MAX_PARTS {
        return Err(BackupError::TooManyParts {
            required: total,
            limit: MAX_PARTS,
        });
    }

    // The payload is base64, so byte-chunking cannot split a character
    let parts = payload
        .as_bytes()
        .chunks(chunk_size)
        .enumerate()
        .map(|(i, chunk)| {
            let chunk = std::str::from_utf8(chunk).map_err(|e| {
                BackupError::MalformedPayload(format!("non-ASCII payload chunk: {}", e))
            })?;
            Ok(format!("{}{:02}{:02}{}", PART_MAGIC, total, i + 1, chunk))
        })
        .collect::<BackupResult<Vec<_>>>()?;

    Ok(parts)
}

/// Restore a backup from scanned parts, in any order
pub fn restore_multi_part_backup(
    parts: &[String],
    password: &str,
) -> BackupResult<BackupEnvelope> {
    // Single unprefixed payload: the plain single-QR path
    if let [only] = parts {
        if !only.starts_with(PART_MAGIC) {
            return restore_backup(only, password);
        }
    }

    if parts.is_empty() {
        return Err(BackupError::MalformedPayload(
            "no QR parts supplied".to_string(),
        ));
    }

    let mut chunks: HashMap<u8, &str> = HashMap::new();
    let mut expected_total: Option<u8> = None;

    for part in parts {
        let (total, index, chunk) = parse_part_header(part)?;

        // Every part declares the total; they must all agree
        if let Some(expected) = expected_total {
            if expected != total {
                return Err(BackupError::MalformedPayload(format!(
                    "parts disagree on total count: {} vs {}",
                    expected, total
                )));
            }
        } else {
            expected_total = Some(total);
        }

        if chunks.insert(index, chunk).is_some() {
            return Err(BackupError::DuplicatePart { index });
        }
    }

    // Non-empty input guarantees a total was recorded
    let total = expected_total.unwrap_or(0);

    let missing: Vec<u8> = (1..=total).filter(|i| !chunks.contains_key(i)).collect();
    if !missing.is_empty() {
        return Err(BackupError::IncompletePayload { missing });
    }

    let mut payload = String::new();
    for index in 1..=total {
        // All indices verified present above
        if let Some(chunk) = chunks.get(&index) {
            payload.push_str(chunk);
        }
    }

    restore_backup(&payload, password)
}

/// Parse one part's header into (total, index, chunk)
fn parse_part_header(part: &str) -> BackupResult<(u8, u8, &str)> {
    if !part.starts_with(PART_MAGIC) {
        return Err(BackupError::MalformedPayload(
            "QR part is missing the CMOA marker".to_string(),
        ));
    }

    // .get() rather than slicing: a scanner could hand us non-ASCII text
    let total_digits = part
        .get(4..6)
        .ok_or_else(|| BackupError::MalformedPayload("QR part header is truncated".to_string()))?;
    let index_digits = part
        .get(6..PART_HEADER_LEN)
        .ok_or_else(|| BackupError::MalformedPayload("QR part header is truncated".to_string()))?;

    let total: u8 = total_digits
        .parse()
        .map_err(|_| BackupError::MalformedPayload("invalid total part count".to_string()))?;
    let index: u8 = index_digits
        .parse()
        .map_err(|_| BackupError::MalformedPayload("invalid part index".to_string()))?;

    if total == 0 || index == 0 || index > total {
        return Err(BackupError::MalformedPayload(format!(
            "part index {} out of range for total {}",
            index, total
        )));
    }

    Ok((total, index, &part[PART_HEADER_LEN..]))
}
