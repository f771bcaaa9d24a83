//! # Electronic Document Model
//!
//! The `ElectronicDocument` record shared by every crate in the stack:
//! invoices, credit notes, debit notes, and quotations with their line
//! items, derived totals, authority identifiers, and delivery history.
//!
//! ## Invariants
//!
//! - `state` holds the raw upstream label. Upstream sources are
//!   inconsistent about the grammatical gender of state suffixes, so the
//!   label is preserved verbatim here and interpreted exclusively through
//!   the tolerant vocabulary in `fedoc-state`.
//! - `access_key` / `authorization_number` / `authorization_date` are
//!   set-once. A document can move on to annulment, but its historical
//!   authorization identifiers are retained for audit.
//! - `delivery_history` is append-only; entries are never rewritten.
//! - `totals` is derived from `line_items` via [`Totals::compute`].

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::identity::{AccessKey, AuthorizationNumber, DocumentId, TaxId};
use crate::temporal::Timestamp;
use crate::totals::{Cents, Totals};

// ─── Document Type ───────────────────────────────────────────────────

/// The kinds of documents the stack manages.
///
/// Invoices, credit notes and debit notes are fiscal: they are submitted
/// to the tax authority and carry authorization identifiers. Quotations
/// are commercial only and never reach the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Sales invoice.
    Invoice,
    /// Credit note compensating a previously authorized document.
    CreditNote,
    /// Debit note charging against a previously authorized document.
    DebitNote,
    /// Commercial quotation; not a fiscal document.
    Quotation,
}

impl DocumentType {
    /// Whether this document type is submitted to the tax authority.
    pub fn is_fiscal(&self) -> bool {
        !matches!(self, Self::Quotation)
    }

    /// Whether this type must reference another document once authorized.
    pub fn requires_reference(&self) -> bool {
        matches!(self, Self::CreditNote | Self::DebitNote)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Invoice => "INVOICE",
            Self::CreditNote => "CREDIT_NOTE",
            Self::DebitNote => "DEBIT_NOTE",
            Self::Quotation => "QUOTATION",
        };
        f.write_str(s)
    }
}

// ─── Line Items ──────────────────────────────────────────────────────

/// One tax applied to a line's taxable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLine {
    /// Tax rate in basis points (1500 = 15.00%).
    pub rate_bp: u32,
}

/// One line of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description as printed.
    pub description: String,
    /// Quantity of units.
    pub quantity: u32,
    /// Unit price in cents.
    pub unit_price: Cents,
    /// Line discount in cents, already multiplied out.
    pub discount: Cents,
    /// Taxes applied to this line's taxable amount.
    pub tax_breakdown: Vec<TaxLine>,
    /// Optional product thumbnail reference (URL or asset key).
    ///
    /// Rendering substitutes a placeholder when this is absent or fails
    /// to load; a broken reference never blocks a render.
    pub thumbnail_ref: Option<String>,
}

// ─── Counterparty ────────────────────────────────────────────────────

/// The customer (or supplier) a document is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    /// Legal or display name.
    pub name: String,
    /// Tax identifier, when known.
    pub tax_id: Option<TaxId>,
    /// Contact email as stored upstream; not yet validated.
    pub email: Option<String>,
    /// Contact phone as stored upstream; not yet normalized.
    pub phone: Option<String>,
}

// ─── Delivery History ────────────────────────────────────────────────

/// The channel a document was delivered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryChannel {
    /// Email with (or without) an attached print rendition.
    Email,
    /// Chat messaging (deep link or share sheet).
    Chat,
}

impl std::fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Email => "EMAIL",
            Self::Chat => "CHAT",
        };
        f.write_str(s)
    }
}

/// Outcome of a completed delivery operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    /// A strategy step delivered the message.
    Sent {
        /// Name of the strategy that succeeded.
        strategy: String,
    },
    /// Recorded by server-side senders when their own retries exhaust.
    Failed {
        /// Terminal failure description.
        reason: String,
    },
}

/// One append-only delivery history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Channel the delivery went out on.
    pub channel: DeliveryChannel,
    /// When the delivery completed.
    pub timestamp: Timestamp,
    /// What happened.
    pub outcome: DeliveryOutcome,
}

// ─── Electronic Document ─────────────────────────────────────────────

/// An electronic document record.
///
/// State transitions happen exclusively through the lifecycle controller;
/// nothing in this crate mutates `state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectronicDocument {
    /// Unique identifier.
    pub id: DocumentId,
    /// Document kind.
    pub document_type: DocumentType,
    /// Human-readable document number (establishment-point-sequential).
    pub sequence: String,
    /// Raw lifecycle state label as the upstream source spelled it.
    pub state: String,
    /// Authority access key, populated once submitted.
    pub access_key: Option<AccessKey>,
    /// Authority authorization number, populated on approval.
    pub authorization_number: Option<AuthorizationNumber>,
    /// When the authority approved the document.
    pub authorization_date: Option<Timestamp>,
    /// The document this one modifies (credit/debit notes).
    pub referenced_document_id: Option<DocumentId>,
    /// Recipient of the document.
    pub counterparty: Counterparty,
    /// Ordered line items.
    pub line_items: Vec<LineItem>,
    /// Derived totals; recompute after editing line items.
    pub totals: Totals,
    /// Append-only delivery log.
    pub delivery_history: Vec<DeliveryRecord>,
    /// Issue date.
    pub issued_at: Timestamp,
}

impl ElectronicDocument {
    /// Create a new draft document with derived totals.
    pub fn new_draft(
        document_type: DocumentType,
        sequence: String,
        counterparty: Counterparty,
        line_items: Vec<LineItem>,
    ) -> Self {
        let totals = Totals::compute(&line_items);
        Self {
            id: DocumentId::new(),
            document_type,
            sequence,
            state: "DRAFT".to_string(),
            access_key: None,
            authorization_number: None,
            authorization_date: None,
            referenced_document_id: None,
            counterparty,
            line_items,
            totals,
            delivery_history: Vec::new(),
            issued_at: Timestamp::now(),
        }
    }

    /// Recompute derived totals from the current line items.
    pub fn recompute_totals(&mut self) {
        self.totals = Totals::compute(&self.line_items);
    }

    /// Record the authority's authorization identifiers.
    ///
    /// Set-once: returns [`DocumentError::AuthorityFieldImmutable`] if any
    /// of the three fields is already populated.
    pub fn set_authorization(
        &mut self,
        access_key: AccessKey,
        number: AuthorizationNumber,
        date: Timestamp,
    ) -> Result<(), DocumentError> {
        if self.access_key.is_some() {
            return Err(DocumentError::AuthorityFieldImmutable { field: "access_key" });
        }
        if self.authorization_number.is_some() {
            return Err(DocumentError::AuthorityFieldImmutable {
                field: "authorization_number",
            });
        }
        if self.authorization_date.is_some() {
            return Err(DocumentError::AuthorityFieldImmutable {
                field: "authorization_date",
            });
        }
        if self.document_type.requires_reference() && self.referenced_document_id.is_none() {
            return Err(DocumentError::MissingReference {
                document_type: self.document_type.to_string(),
            });
        }
        self.access_key = Some(access_key);
        self.authorization_number = Some(number);
        self.authorization_date = Some(date);
        Ok(())
    }

    /// Append one delivery history entry.
    pub fn record_delivery(&mut self, record: DeliveryRecord) {
        self.delivery_history.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counterparty() -> Counterparty {
        Counterparty {
            name: "ACME Distribución S.A.".to_string(),
            tax_id: TaxId::new("1790012345001").ok(),
            email: Some("compras@acme.ec".to_string()),
            phone: Some("0991234567".to_string()),
        }
    }

    fn invoice() -> ElectronicDocument {
        ElectronicDocument::new_draft(
            DocumentType::Invoice,
            "001-002-000000123".to_string(),
            counterparty(),
            vec![LineItem {
                description: "Servicio mensual".to_string(),
                quantity: 1,
                unit_price: 10_000,
                discount: 0,
                tax_breakdown: vec![TaxLine { rate_bp: 1500 }],
                thumbnail_ref: None,
            }],
        )
    }

    fn authorization() -> (AccessKey, AuthorizationNumber, Timestamp) {
        (
            AccessKey::new("1".repeat(49)).unwrap(),
            AuthorizationNumber::new("1".repeat(49)).unwrap(),
            Timestamp::parse("2026-02-01T10:00:00Z").unwrap(),
        )
    }

    #[test]
    fn test_new_draft_state_and_totals() {
        let doc = invoice();
        assert_eq!(doc.state, "DRAFT");
        assert_eq!(doc.totals.grand_total, 11_500);
        assert!(doc.delivery_history.is_empty());
    }

    #[test]
    fn test_set_authorization_once() {
        let mut doc = invoice();
        let (key, number, date) = authorization();
        doc.set_authorization(key, number, date).unwrap();
        assert!(doc.access_key.is_some());

        let (key, number, date) = authorization();
        let again = doc.set_authorization(key, number, date);
        assert!(matches!(
            again,
            Err(DocumentError::AuthorityFieldImmutable { field: "access_key" })
        ));
    }

    #[test]
    fn test_credit_note_requires_reference() {
        let mut doc = invoice();
        doc.document_type = DocumentType::CreditNote;
        let (key, number, date) = authorization();
        assert!(matches!(
            doc.set_authorization(key, number, date),
            Err(DocumentError::MissingReference { .. })
        ));

        doc.referenced_document_id = Some(DocumentId::new());
        let (key, number, date) = authorization();
        assert!(doc.set_authorization(key, number, date).is_ok());
    }

    #[test]
    fn test_recompute_totals_tracks_edits() {
        let mut doc = invoice();
        doc.line_items[0].quantity = 2;
        doc.recompute_totals();
        assert_eq!(doc.totals.grand_total, 23_000);
    }

    #[test]
    fn test_delivery_history_appends() {
        let mut doc = invoice();
        doc.record_delivery(DeliveryRecord {
            channel: DeliveryChannel::Email,
            timestamp: Timestamp::now(),
            outcome: DeliveryOutcome::Sent { strategy: "backend-attachment".to_string() },
        });
        assert_eq!(doc.delivery_history.len(), 1);
    }

    #[test]
    fn test_document_serialization_roundtrip() {
        let doc = invoice();
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: ElectronicDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
