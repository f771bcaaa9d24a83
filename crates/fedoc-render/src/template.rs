//! # Template Layout — Banded Print Structure
//!
//! Pure layout: turns a document record and branding into an ordered
//! list of bands with fixed logical heights. No pixels are touched here;
//! the renderer draws whatever this module lays out.
//!
//! Band order mirrors the print format: header, counterparty summary,
//! line-item table, totals panel, bank-details footer.

use fedoc_core::totals::format_cents;
use fedoc_core::{DocumentType, ElectronicDocument};

use crate::branding::Branding;

// ─── Bands ───────────────────────────────────────────────────────────

/// One horizontal band of the print layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Band {
    /// Company identity, document title, number and access key.
    Header {
        /// Company legal name.
        company_name: String,
        /// Company tax id and address, one line each.
        identity_lines: Vec<String>,
        /// Document title (FACTURA, NOTA DE CREDITO, ...).
        title: String,
        /// Document number.
        sequence: String,
        /// Authority access key, when assigned.
        access_key: Option<String>,
        /// Logo reference for the image source.
        logo_ref: Option<String>,
    },
    /// Recipient summary.
    Counterparty {
        /// Recipient name.
        name: String,
        /// Recipient tax id, when known.
        tax_id: Option<String>,
        /// Recipient email, when known.
        email: Option<String>,
        /// Issue date as printed.
        issued_at: String,
    },
    /// Column captions for the line-item table.
    TableHeader,
    /// One line item, values preformatted for printing.
    LineRow {
        /// Item description.
        description: String,
        /// Quantity.
        quantity: String,
        /// Unit price.
        unit_price: String,
        /// Line discount.
        discount: String,
        /// Tax rates applied, e.g. `15%`.
        tax: String,
        /// Line total (taxable amount).
        line_total: String,
        /// Thumbnail reference; renderer substitutes a placeholder when
        /// missing or broken.
        thumbnail_ref: Option<String>,
    },
    /// Right-aligned label/value rows: per-rate subtotals, tax, total.
    TotalsPanel {
        /// (label, value) rows, top to bottom.
        rows: Vec<(String, String)>,
    },
    /// Bank-transfer details.
    BankFooter {
        /// One line per account.
        lines: Vec<String>,
    },
}

impl Band {
    /// Logical height of this band in pixels at scale 1.
    pub fn height(&self) -> u32 {
        match self {
            Band::Header { .. } => 110,
            Band::Counterparty { .. } => 64,
            Band::TableHeader => 22,
            Band::LineRow { .. } => 48,
            Band::TotalsPanel { rows } => 14 + 18 * rows.len() as u32,
            Band::BankFooter { lines } => 14 + 16 * lines.len() as u32,
        }
    }
}

// ─── Template ────────────────────────────────────────────────────────

/// The composed print layout for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Bands in print order.
    pub bands: Vec<Band>,
}

impl Template {
    /// Lay out a document against a branding block.
    pub fn compose(document: &ElectronicDocument, branding: &Branding) -> Self {
        let mut bands = Vec::with_capacity(document.line_items.len() + 5);

        let mut identity_lines = vec![format!("RUC {}", branding.company_tax_id)];
        if !branding.address.is_empty() {
            identity_lines.push(branding.address.clone());
        }
        if let Some(email) = &branding.email {
            identity_lines.push(email.clone());
        }
        if let Some(phone) = &branding.phone {
            identity_lines.push(phone.clone());
        }

        bands.push(Band::Header {
            company_name: branding.company_name.clone(),
            identity_lines,
            title: title_for(document.document_type).to_string(),
            sequence: document.sequence.clone(),
            access_key: document.access_key.as_ref().map(|k| k.as_str().to_string()),
            logo_ref: branding.logo_ref.clone(),
        });

        bands.push(Band::Counterparty {
            name: document.counterparty.name.clone(),
            tax_id: document.counterparty.tax_id.as_ref().map(|t| t.as_str().to_string()),
            email: document.counterparty.email.clone(),
            issued_at: document.issued_at.to_iso8601(),
        });

        bands.push(Band::TableHeader);
        for line in &document.line_items {
            let gross = line.unit_price * i64::from(line.quantity);
            let taxable = gross - line.discount;
            let tax = line
                .tax_breakdown
                .iter()
                .map(|t| format_rate(t.rate_bp))
                .collect::<Vec<_>>()
                .join("+");
            bands.push(Band::LineRow {
                description: line.description.clone(),
                quantity: line.quantity.to_string(),
                unit_price: format_cents(line.unit_price),
                discount: format_cents(line.discount),
                tax,
                line_total: format_cents(taxable),
                thumbnail_ref: line.thumbnail_ref.clone(),
            });
        }

        let mut rows = Vec::new();
        for bucket in &document.totals.subtotal_by_rate {
            rows.push((
                format!("SUBTOTAL {}", format_rate(bucket.rate_bp)),
                format_cents(bucket.subtotal),
            ));
        }
        rows.push(("DESCUENTO".to_string(), format_cents(document.totals.discount_amount)));
        rows.push(("IVA".to_string(), format_cents(document.totals.tax_amount)));
        rows.push(("TOTAL".to_string(), format_cents(document.totals.grand_total)));
        bands.push(Band::TotalsPanel { rows });

        if !branding.bank_details.is_empty() {
            bands.push(Band::BankFooter { lines: branding.bank_details.clone() });
        }

        Self { bands }
    }

    /// Total logical height of the template at scale 1.
    pub fn total_height(&self) -> u32 {
        self.bands.iter().map(Band::height).sum()
    }
}

fn title_for(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::Invoice => "FACTURA",
        DocumentType::CreditNote => "NOTA DE CREDITO",
        DocumentType::DebitNote => "NOTA DE DEBITO",
        DocumentType::Quotation => "PROFORMA",
    }
}

/// `1500` basis points → `15%`; non-integral rates keep two decimals.
fn format_rate(rate_bp: u32) -> String {
    if rate_bp % 100 == 0 {
        format!("{}%", rate_bp / 100)
    } else {
        format!("{}.{:02}%", rate_bp / 100, rate_bp % 100)
    }
}
