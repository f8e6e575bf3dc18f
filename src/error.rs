//! Custom error types for CodeMOA
//!
//! Two error enums live here: `CodemoaError` for application-level failures
//! (storage, config, CLI glue) and `BackupError` for the backup codec. The
//! codec taxonomy is deliberately terminal and non-retryable; retry policy
//! belongs to the caller.

use thiserror::Error;

/// The main error type for CodeMOA operations
#[derive(Error, Debug)]
pub enum CodemoaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Backup codec errors
    #[error(transparent)]
    Backup(#[from] BackupError),
}

impl CodemoaError {
    /// Create a "not found" error for cards
    pub fn card_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Card",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for CodemoaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CodemoaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for CodeMOA operations
pub type CodemoaResult<T> = Result<T, CodemoaError>;

/// Failures of the QR backup codec
///
/// Every stage of the create/restore pipeline fails fast and maps its
/// low-level cause into exactly one of these kinds. No partial result is
/// ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackupError {
    /// Password is not exactly 4 ASCII digits
    #[error("backup password must be exactly 4 digits")]
    InvalidPassword,

    /// Single-payload encoding exceeds the QR transport limit
    #[error("backup payload is {size} characters, exceeding the QR limit of {limit}; remove some cards or use a multi-part backup")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Structural decode failure (base64/JSON) or missing part header
    #[error("malformed backup payload: {0}")]
    MalformedPayload(String),

    /// Verification hash mismatch, detected before any decryption
    #[error("wrong backup password")]
    WrongPassword,

    /// Decryption, decompression, or envelope parsing failed after the
    /// password verified, implying tampering or transport corruption
    #[error("backup data is corrupted: {0}")]
    CorruptData(String),

    /// Multi-part reassembly is missing one or more part indices
    #[error("incomplete multi-part backup: missing part(s) {missing:?}")]
    IncompletePayload { missing: Vec<u8> },

    /// The same part index was supplied more than once
    #[error("duplicate multi-part backup part {index}")]
    DuplicatePart { index: u8 },

    /// The payload would need more parts than the 2-digit header can carry
    #[error("backup would require {required} parts, exceeding the limit of {limit}")]
    TooManyParts { required: usize, limit: usize },
}

/// Result type alias for backup codec operations
pub type BackupResult<T> = Result<T, BackupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodemoaError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = CodemoaError::card_not_found("abc123");
        assert_eq!(err.to_string(), "Card not found: abc123");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_backup_error_converts() {
        let err: CodemoaError = BackupError::WrongPassword.into();
        assert_eq!(err.to_string(), "wrong backup password");
    }

    #[test]
    fn test_incomplete_payload_names_indices() {
        let err = BackupError::IncompletePayload { missing: vec![2, 5] };
        assert_eq!(
            err.to_string(),
            "incomplete multi-part backup: missing part(s) [2, 5]"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let codemoa_err: CodemoaError = io_err.into();
        assert!(matches!(codemoa_err, CodemoaError::Io(_)));
    }
}
