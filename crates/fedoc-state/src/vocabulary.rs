//! # State Vocabulary — Gender-Tolerant Lifecycle States
//!
//! The canonical set of lifecycle states and the tolerant label matcher.
//!
//! ## States and Transition Groups
//!
//! ```text
//! Pre-submission:    DRAFT, PENDING, GENERATED, SIGNED
//! Submission:        SENT, PENDING_SEND, RECEIVED, PROCESSING
//! Terminal success:  AUTHORIZED
//! Terminal failure:  NOT_AUTHORIZED, ERROR        (recoverable via retry)
//! Absorbing:         ANNULLED (from AUTHORIZED), CANCELLED (from pre-submission)
//! ```
//!
//! ## Tolerant Matching
//!
//! Upstream sources label the same state with either the masculine or the
//! feminine Spanish suffix: `AUTORIZADO` and `AUTORIZADA` are one state.
//! [`matches`] normalizes case and treats a trailing `O`↔`A` swap as
//! equality before falling back to strict comparison. It is a pure string
//! transform, not a dictionary — it works on labels the vocabulary has
//! never seen.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Tolerant matcher ────────────────────────────────────────────────

/// Compare two state labels, tolerating a trailing `O`↔`A` gender swap.
///
/// Normalizes case and surrounding whitespace first. `matches` is
/// symmetric and reflexive, and the only non-strict equality it admits is
/// the final-vowel swap:
///
/// ```
/// use fedoc_state::matches;
///
/// assert!(matches("AUTORIZADO", "AUTORIZADA"));
/// assert!(matches("anulada", "ANULADO"));
/// assert!(!matches("ERROR", "AUTORIZADO"));
/// ```
pub fn matches(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if a == b {
        return true;
    }
    match (a.strip_suffix(['O', 'A']), b.strip_suffix(['O', 'A'])) {
        (Some(stem_a), Some(stem_b)) => stem_a == stem_b,
        _ => false,
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_uppercase()
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised when interpreting state labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The label matched no known state, even tolerantly.
    #[error("unrecognized document state label: {label:?}")]
    UnknownLabel {
        /// The offending raw label.
        label: String,
    },
}

// ─── Canonical states ────────────────────────────────────────────────

/// The canonical lifecycle states of an electronic document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocState {
    /// Being edited; nothing generated yet.
    Draft,
    /// Queued for generation.
    Pending,
    /// XML rendition generated, unsigned.
    Generated,
    /// XML rendition signed locally.
    Signed,
    /// Submitted to the authority.
    Sent,
    /// Queued for submission to the authority.
    PendingSend,
    /// Authority acknowledged receipt.
    Received,
    /// Authority is validating the document.
    Processing,
    /// Authority approved the document (terminal success).
    Authorized,
    /// Authority rejected the document (recoverable).
    NotAuthorized,
    /// Authorized document neutralized (absorbing).
    Annulled,
    /// Never-submitted document discarded (absorbing).
    Cancelled,
    /// Submission or validation failed (recoverable).
    Error,
}

/// Every canonical state, for exhaustive table tests and property tests.
pub const ALL_STATES: [DocState; 13] = [
    DocState::Draft,
    DocState::Pending,
    DocState::Generated,
    DocState::Signed,
    DocState::Sent,
    DocState::PendingSend,
    DocState::Received,
    DocState::Processing,
    DocState::Authorized,
    DocState::NotAuthorized,
    DocState::Annulled,
    DocState::Cancelled,
    DocState::Error,
];

impl DocState {
    /// Known labels for this state: the canonical label plus the
    /// masculine Spanish alias. Feminine variants are covered by the
    /// tolerant matcher, not listed.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            Self::Draft => &["DRAFT", "BORRADOR"],
            Self::Pending => &["PENDING", "PENDIENTE"],
            Self::Generated => &["GENERATED", "GENERADO"],
            Self::Signed => &["SIGNED", "FIRMADO"],
            Self::Sent => &["SENT", "ENVIADO"],
            Self::PendingSend => &["PENDING_SEND", "PENDIENTE_ENVIO"],
            Self::Received => &["RECEIVED", "RECIBIDO"],
            Self::Processing => &["PROCESSING", "PROCESANDO"],
            Self::Authorized => &["AUTHORIZED", "AUTORIZADO"],
            Self::NotAuthorized => &["NOT_AUTHORIZED", "NO_AUTORIZADO"],
            Self::Annulled => &["ANNULLED", "ANULADO"],
            Self::Cancelled => &["CANCELLED", "CANCELADO"],
            Self::Error => &["ERROR"],
        }
    }

    /// Parse a raw upstream label into a canonical state, tolerantly.
    pub fn parse(label: &str) -> Result<Self, StateError> {
        ALL_STATES
            .into_iter()
            .find(|state| state.labels().iter().any(|known| matches(known, label)))
            .ok_or_else(|| StateError::UnknownLabel { label: label.to_string() })
    }

    /// Whether this label names this state, tolerantly.
    pub fn matches_label(&self, label: &str) -> bool {
        self.labels().iter().any(|known| matches(known, label))
    }

    // ── Transition groups ────────────────────────────────────────────

    /// DRAFT, PENDING, GENERATED, SIGNED — not yet submitted.
    pub fn is_pre_submission(&self) -> bool {
        matches!(self, Self::Draft | Self::Pending | Self::Generated | Self::Signed)
    }

    /// SENT, PENDING_SEND, RECEIVED, PROCESSING — in flight at the authority.
    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Sent | Self::PendingSend | Self::Received | Self::Processing)
    }

    /// NOT_AUTHORIZED, ERROR — failed but recoverable via retry.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::NotAuthorized | Self::Error)
    }

    /// ANNULLED, CANCELLED — no transition leaves these.
    pub fn is_absorbing(&self) -> bool {
        matches!(self, Self::Annulled | Self::Cancelled)
    }

    /// Whether the authority has ever responded to (or acknowledged)
    /// this document. Once true, the document is append-only: it can be
    /// reversed by a compensating document, never edited or deleted.
    pub fn has_authority_response(&self) -> bool {
        matches!(
            self,
            Self::Received | Self::Processing | Self::Authorized | Self::NotAuthorized | Self::Annulled
        )
    }
}

impl std::fmt::Display for DocState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.labels()[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Tolerant matcher ─────────────────────────────────────────────

    #[test]
    fn test_matches_gender_variants() {
        assert!(matches("AUTORIZADO", "AUTORIZADA"));
        assert!(matches("ANULADA", "ANULADO"));
        assert!(matches("RECIBIDA", "RECIBIDO"));
    }

    #[test]
    fn test_matches_case_and_whitespace() {
        assert!(matches("autorizado", "AUTORIZADO"));
        assert!(matches("  FIRMADO ", "firmado"));
    }

    #[test]
    fn test_matches_distinct_states() {
        assert!(!matches("ERROR", "AUTORIZADO"));
        assert!(!matches("ANULADO", "AUTORIZADO"));
        assert!(!matches("ENVIADO", "ENVIADA_X"));
    }

    #[test]
    fn test_matches_does_not_swap_inner_vowels() {
        // Only the trailing vowel participates in the swap.
        assert!(!matches("GANADO", "GENADO"));
    }

    // ── Parsing ──────────────────────────────────────────────────────

    #[test]
    fn test_parse_canonical_labels() {
        for state in ALL_STATES {
            assert_eq!(DocState::parse(state.labels()[0]), Ok(state));
        }
    }

    #[test]
    fn test_parse_spanish_feminine_variants() {
        assert_eq!(DocState::parse("AUTORIZADA"), Ok(DocState::Authorized));
        assert_eq!(DocState::parse("ANULADA"), Ok(DocState::Annulled));
        assert_eq!(DocState::parse("RECIBIDA"), Ok(DocState::Received));
        assert_eq!(DocState::parse("FIRMADA"), Ok(DocState::Signed));
        assert_eq!(DocState::parse("NO_AUTORIZADA"), Ok(DocState::NotAuthorized));
    }

    #[test]
    fn test_parse_unknown_label() {
        assert!(matches!(
            DocState::parse("LIMBO"),
            Err(StateError::UnknownLabel { .. })
        ));
    }

    #[test]
    fn test_parse_is_unambiguous() {
        // Every known label of every state parses back to that state.
        for state in ALL_STATES {
            for label in state.labels() {
                assert_eq!(DocState::parse(label), Ok(state), "label {label}");
            }
        }
    }

    // ── Groups ───────────────────────────────────────────────────────

    #[test]
    fn test_groups_partition_states() {
        for state in ALL_STATES {
            let memberships = [
                state.is_pre_submission(),
                state.is_submission(),
                state == DocState::Authorized,
                state.is_terminal_failure(),
                state.is_absorbing(),
            ];
            let count = memberships.iter().filter(|m| **m).count();
            assert_eq!(count, 1, "{state} must belong to exactly one group");
        }
    }

    #[test]
    fn test_authority_response_membership() {
        assert!(DocState::Authorized.has_authority_response());
        assert!(DocState::NotAuthorized.has_authority_response());
        assert!(DocState::Annulled.has_authority_response());
        assert!(!DocState::Draft.has_authority_response());
        assert!(!DocState::Signed.has_authority_response());
        assert!(!DocState::Sent.has_authority_response());
        assert!(!DocState::Cancelled.has_authority_response());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let json = serde_json::to_string(&DocState::PendingSend).unwrap();
        let parsed: DocState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DocState::PendingSend);
    }
}
