//! # Derived Totals — Integer-Cent Money Aggregation
//!
//! Computes document totals from line items. Totals are derived values:
//! there is no code path that accepts hand-edited totals, so a document's
//! line items and its totals panel can never disagree.
//!
//! ## Invariant
//!
//! All amounts are integer cents (`i64`). Tax rates are basis points
//! (`1500` = 15.00%). Rounding is half-up at the line level, matching how
//! the authority validates submitted totals.

use serde::{Deserialize, Serialize};

use crate::document::LineItem;

/// A monetary amount in integer cents.
pub type Cents = i64;

/// Subtotal of taxable amounts accumulated under one tax rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSubtotal {
    /// Tax rate in basis points (1500 = 15.00%).
    pub rate_bp: u32,
    /// Sum of taxable amounts at this rate.
    pub subtotal: Cents,
}

/// Derived totals for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Totals {
    /// Taxable subtotal per tax rate, ascending by rate.
    pub subtotal_by_rate: Vec<RateSubtotal>,
    /// Total tax across all lines and rates.
    pub tax_amount: Cents,
    /// Total discount across all lines.
    pub discount_amount: Cents,
    /// Grand total: taxable subtotals plus tax.
    pub grand_total: Cents,
}

impl Totals {
    /// Compute totals from line items.
    pub fn compute(line_items: &[LineItem]) -> Self {
        let mut by_rate: Vec<RateSubtotal> = Vec::new();
        let mut tax_amount: Cents = 0;
        let mut discount_amount: Cents = 0;
        let mut taxable_total: Cents = 0;

        for line in line_items {
            let gross = line.unit_price * Cents::from(line.quantity);
            let taxable = gross - line.discount;
            discount_amount += line.discount;
            taxable_total += taxable;

            for tax in &line.tax_breakdown {
                tax_amount += apply_rate(taxable, tax.rate_bp);
                match by_rate.iter_mut().find(|r| r.rate_bp == tax.rate_bp) {
                    Some(bucket) => bucket.subtotal += taxable,
                    None => by_rate.push(RateSubtotal {
                        rate_bp: tax.rate_bp,
                        subtotal: taxable,
                    }),
                }
            }
        }

        by_rate.sort_by_key(|r| r.rate_bp);

        Self {
            subtotal_by_rate: by_rate,
            tax_amount,
            discount_amount,
            grand_total: taxable_total + tax_amount,
        }
    }
}

/// Apply a basis-point rate to an amount, rounding half-up.
fn apply_rate(amount: Cents, rate_bp: u32) -> Cents {
    let product = amount * Cents::from(rate_bp);
    // Half-up rounding over the 10_000 basis-point divisor.
    (product + 5_000).div_euclid(10_000)
}

/// Format cents as a decimal string, e.g. `1234` → `"12.34"`.
pub fn format_cents(amount: Cents) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
