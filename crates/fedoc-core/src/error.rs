//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared across the FEDOC stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Identifier validation errors name the offending field and value.
//! - Immutability violations (overwriting an authority identifier) fail
//!   loudly with the existing value preserved.
//! - Downstream crates define their own error enums and convert into or
//!   wrap these as needed.

use thiserror::Error;

/// Errors raised by the document model.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// An identifier failed its format validation.
    #[error("invalid {field}: {value:?}")]
    InvalidIdentifier {
        /// Which identifier field was rejected.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// An authority identifier was already populated and cannot change.
    ///
    /// Authorization identifiers are part of the audit record; once the
    /// tax authority has stamped a document they are immutable, even
    /// through annulment.
    #[error("{field} is already set and immutable")]
    AuthorityFieldImmutable {
        /// The field that was already set.
        field: &'static str,
    },

    /// A timestamp failed parsing or violated the UTC-only rule.
    #[error("timestamp error: {0}")]
    Timestamp(String),

    /// A referenced document is required but absent.
    #[error("{document_type} requires a referenced document once authorized")]
    MissingReference {
        /// The document type that carries the requirement.
        document_type: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
