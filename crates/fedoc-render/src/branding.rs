//! # Branding Configuration
//!
//! Company-level presentation data stamped onto every rendered document:
//! header identity, bank-transfer details, and the optional logo
//! reference. Loaded by the surrounding application; this crate only
//! consumes it.

use serde::{Deserialize, Serialize};

/// Branding block for rendered documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    /// Company legal name, printed in the header band.
    pub company_name: String,
    /// Company tax identifier, printed under the name.
    pub company_tax_id: String,
    /// Street address line.
    pub address: String,
    /// Contact email printed in the header.
    pub email: Option<String>,
    /// Contact phone printed in the header.
    pub phone: Option<String>,
    /// Logo image reference resolved through the renderer's image source.
    pub logo_ref: Option<String>,
    /// Bank-transfer detail lines for the footer, one per account.
    pub bank_details: Vec<String>,
}

impl Branding {
    /// A minimal branding block for tests and tooling defaults.
    pub fn minimal(company_name: impl Into<String>, company_tax_id: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            company_tax_id: company_tax_id.into(),
            address: String::new(),
            email: None,
            phone: None,
            logo_ref: None,
            bank_details: Vec::new(),
        }
    }
}
