//! # Message Composition
//!
//! Channel-appropriate message bodies: email gets a full body with a
//! signature block; chat gets a terse one-liner. Also the tiny
//! percent-encoder used to place those bodies inside `mailto:` and chat
//! link URLs.

use fedoc_core::{DeliveryChannel, DocumentType, ElectronicDocument};
use fedoc_core::totals::format_cents;

/// A composed message for one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    /// Subject line (email only; chat links ignore it).
    pub subject: String,
    /// Message text.
    pub body: String,
}

impl MessageBody {
    /// Compose the message for a channel.
    pub fn compose(
        channel: DeliveryChannel,
        document: &ElectronicDocument,
        sender_name: &str,
    ) -> Self {
        let kind = kind_label(document.document_type);
        let subject = format!("{kind} {} — {sender_name}", document.sequence);
        let total = format_cents(document.totals.grand_total);

        let body = match channel {
            DeliveryChannel::Email => format!(
                "Estimado/a {},\n\n\
                 Adjuntamos su {kind} No. {} por un total de ${total}.\n\n\
                 Saludos cordiales,\n{sender_name}",
                document.counterparty.name, document.sequence,
            ),
            DeliveryChannel::Chat => format!(
                "{kind} {} por ${total} — {sender_name}",
                document.sequence,
            ),
        };

        Self { subject, body }
    }
}

fn kind_label(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::Invoice => "Factura",
        DocumentType::CreditNote => "Nota de crédito",
        DocumentType::DebitNote => "Nota de débito",
        DocumentType::Quotation => "Proforma",
    }
}

/// Percent-encode a string for use inside a URL query value.
///
/// Unreserved characters (RFC 3986) pass through; everything else is
/// `%XX`-escaped byte-wise.
pub fn url_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
