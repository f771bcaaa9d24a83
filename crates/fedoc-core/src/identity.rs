//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifiers of the FEDOC stack. These
//! prevent accidental identifier confusion — you cannot pass an
//! `AccessKey` where an `AuthorizationNumber` is expected, even though
//! both are numeric strings on the wire.
//!
//! The tax-authority identifiers (`AccessKey`, `AuthorizationNumber`)
//! have validated constructors: the authority emits fixed-format numeric
//! strings and anything else indicates a corrupted upstream record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DocumentError;

/// Unique identifier for an electronic document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    /// Generate a new random document identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The 49-digit access key the tax authority assigns to a submitted
/// document. Doubles as the lookup key for authority-side status checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessKey(String);

impl AccessKey {
    /// Validate and wrap an access key. Must be exactly 49 digits.
    pub fn new(raw: impl Into<String>) -> Result<Self, DocumentError> {
        let raw = raw.into();
        if raw.len() == 49 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw))
        } else {
            Err(DocumentError::InvalidIdentifier {
                field: "access_key",
                value: raw,
            })
        }
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The authorization number the authority returns on approval.
///
/// Historically a separate 10–49 digit number; current authority
/// deployments echo the access key. Both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorizationNumber(String);

impl AuthorizationNumber {
    /// Validate and wrap an authorization number (10–49 digits).
    pub fn new(raw: impl Into<String>) -> Result<Self, DocumentError> {
        let raw = raw.into();
        if (10..=49).contains(&raw.len()) && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw))
        } else {
            Err(DocumentError::InvalidIdentifier {
                field: "authorization_number",
                value: raw,
            })
        }
    }

    /// The number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuthorizationNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counterparty tax identifier (RUC or national id card number).
///
/// Format: 10 or 13 numeric digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxId(String);

impl TaxId {
    /// Validate and wrap a tax identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, DocumentError> {
        let raw = raw.into();
        if matches!(raw.len(), 10 | 13) && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw))
        } else {
            Err(DocumentError::InvalidIdentifier {
                field: "tax_id",
                value: raw,
            })
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_key_accepts_49_digits() {
        let raw = "1".repeat(49);
        assert!(AccessKey::new(raw).is_ok());
    }

    #[test]
    fn test_access_key_rejects_wrong_length() {
        assert!(AccessKey::new("12345").is_err());
        assert!(AccessKey::new("1".repeat(50)).is_err());
    }

    #[test]
    fn test_access_key_rejects_non_digits() {
        let mut raw = "2".repeat(48);
        raw.push('X');
        assert!(AccessKey::new(raw).is_err());
    }

    #[test]
    fn test_authorization_number_accepts_both_shapes() {
        assert!(AuthorizationNumber::new("1234567890").is_ok());
        assert!(AuthorizationNumber::new("9".repeat(49)).is_ok());
    }

    #[test]
    fn test_authorization_number_rejects_short() {
        assert!(AuthorizationNumber::new("123456789").is_err());
    }

    #[test]
    fn test_tax_id_lengths() {
        assert!(TaxId::new("1790012345").is_ok());
        assert!(TaxId::new("1790012345001").is_ok());
        assert!(TaxId::new("17900123450").is_err());
    }

    #[test]
    fn test_document_id_roundtrip() {
        let id = DocumentId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
