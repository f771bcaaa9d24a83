//! # Contact Subcommand
//!
//! Validates and normalizes a delivery contact the same way a send
//! would, so data problems surface before a document is on the line.

use anyhow::bail;
use clap::Args;

use fedoc_delivery::{EmailAddress, PhoneNumber};

/// Arguments for the contact subcommand.
#[derive(Args, Debug)]
pub struct ContactArgs {
    /// Email address to validate.
    #[arg(long, conflicts_with = "phone")]
    pub email: Option<String>,

    /// Phone number to normalize.
    #[arg(long)]
    pub phone: Option<String>,

    /// Country calling code used for phone normalization (digits only).
    #[arg(long, default_value = "593")]
    pub country_code: String,
}

/// Validate the contact and print its normalized form.
pub fn run(args: &ContactArgs) -> anyhow::Result<()> {
    match (&args.email, &args.phone) {
        (Some(email), None) => {
            let address = EmailAddress::parse(email)?;
            println!("email ok: {address}");
        }
        (None, Some(phone)) => {
            let normalized = PhoneNumber::normalize(phone, &args.country_code)?;
            println!("phone ok: {normalized}");
        }
        _ => bail!("pass exactly one of --email or --phone"),
    }
    Ok(())
}
