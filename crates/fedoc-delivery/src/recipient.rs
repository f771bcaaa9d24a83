//! # Recipient Resolution and Validation
//!
//! Resolves the contact a document goes to: the counterparty record
//! first, then a synchronous operator prompt as fallback. No valid
//! contact aborts the whole send before any rendering or network work.
//!
//! Email validity is the standard `local@domain.tld` shape. Phones are
//! normalized to a national E.164-style form: non-digits stripped, the
//! local leading zero dropped, the country calling code prefixed.

use serde::{Deserialize, Serialize};

use fedoc_core::{Counterparty, DeliveryChannel};

use crate::error::DeliveryError;

// ─── Email ───────────────────────────────────────────────────────────

/// A validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate a raw address: exactly one `@`, non-empty local part,
    /// and a dotted domain with non-empty labels.
    pub fn parse(raw: &str) -> Result<Self, DeliveryError> {
        let raw = raw.trim();
        let invalid = |detail: &str| DeliveryError::InvalidRecipient {
            detail: format!("{detail}: {raw:?}"),
        };

        let (local, domain) = raw.split_once('@').ok_or_else(|| invalid("missing @"))?;
        if local.is_empty() || domain.contains('@') {
            return Err(invalid("malformed email"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(invalid("email contains whitespace"));
        }
        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(invalid("email domain must be dotted"));
        }
        Ok(Self(raw.to_string()))
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Phone ───────────────────────────────────────────────────────────

/// A phone number normalized to `+<country><national>` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize a raw phone number against a country calling code
    /// (digits only, e.g. `"593"`).
    ///
    /// Non-digit characters are stripped; an existing country-code
    /// prefix is kept; otherwise the local leading zero is dropped and
    /// the country code prepended. The national part must be 8–10
    /// digits.
    pub fn normalize(raw: &str, country_code: &str) -> Result<Self, DeliveryError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let invalid = |detail: &str| DeliveryError::InvalidRecipient {
            detail: format!("{detail}: {raw:?}"),
        };
        if digits.is_empty() {
            return Err(invalid("phone has no digits"));
        }

        let national = if let Some(rest) = digits.strip_prefix(country_code) {
            rest.to_string()
        } else {
            digits.strip_prefix('0').unwrap_or(&digits).to_string()
        };

        if !(8..=10).contains(&national.len()) {
            return Err(invalid("phone national part must be 8-10 digits"));
        }
        Ok(Self(format!("+{country_code}{national}")))
    }

    /// The normalized number including the leading `+`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits only, without the leading `+` (deep-link format).
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Recipient ───────────────────────────────────────────────────────

/// The resolved contact a delivery goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Email channel contact.
    Email(EmailAddress),
    /// Chat channel contact.
    Phone(PhoneNumber),
}

// ─── Operator prompt ─────────────────────────────────────────────────

/// Synchronous operator fallback when the counterparty record has no
/// usable contact. Implemented by the surrounding UI; the orchestrator
/// calls it at most once per send.
pub trait ContactPrompt: Send + Sync {
    /// Ask the operator for a replacement email. `None` aborts.
    fn replacement_email(&self, counterparty: &Counterparty) -> Option<String>;
    /// Ask the operator for a replacement phone. `None` aborts.
    fn replacement_phone(&self, counterparty: &Counterparty) -> Option<String>;
}

/// A prompt that never supplies anything; missing contacts abort.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl ContactPrompt for NoPrompt {
    fn replacement_email(&self, _counterparty: &Counterparty) -> Option<String> {
        None
    }

    fn replacement_phone(&self, _counterparty: &Counterparty) -> Option<String> {
        None
    }
}

/// Resolve the contact for a channel, consulting the prompt when the
/// stored contact is absent or invalid.
pub fn resolve(
    counterparty: &Counterparty,
    channel: DeliveryChannel,
    country_code: &str,
    prompt: &dyn ContactPrompt,
) -> Result<Recipient, DeliveryError> {
    match channel {
        DeliveryChannel::Email => {
            if let Some(stored) = &counterparty.email {
                if let Ok(address) = EmailAddress::parse(stored) {
                    return Ok(Recipient::Email(address));
                }
            }
            let supplied = prompt
                .replacement_email(counterparty)
                .ok_or(DeliveryError::MissingContact { channel })?;
            Ok(Recipient::Email(EmailAddress::parse(&supplied)?))
        }
        DeliveryChannel::Chat => {
            if let Some(stored) = &counterparty.phone {
                if let Ok(phone) = PhoneNumber::normalize(stored, country_code) {
                    return Ok(Recipient::Phone(phone));
                }
            }
            let supplied = prompt
                .replacement_phone(counterparty)
                .ok_or(DeliveryError::MissingContact { channel })?;
            Ok(Recipient::Phone(PhoneNumber::normalize(&supplied, country_code)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counterparty(email: Option<&str>, phone: Option<&str>) -> Counterparty {
        Counterparty {
            name: "Cliente".to_string(),
            tax_id: None,
            email: email.map(String::from),
            phone: phone.map(String::from),
        }
    }

    struct FixedPrompt {
        email: Option<&'static str>,
        phone: Option<&'static str>,
    }

    impl ContactPrompt for FixedPrompt {
        fn replacement_email(&self, _: &Counterparty) -> Option<String> {
            self.email.map(String::from)
        }
        fn replacement_phone(&self, _: &Counterparty) -> Option<String> {
            self.phone.map(String::from)
        }
    }

    // ── Email validation ─────────────────────────────────────────────

    #[test]
    fn test_email_accepts_standard_shape() {
        assert!(EmailAddress::parse("facturas@cliente.ec").is_ok());
        assert!(EmailAddress::parse("a.b+c@sub.dominio.com").is_ok());
    }

    #[test]
    fn test_email_rejects_malformed() {
        for raw in ["", "sin-arroba", "@dominio.com", "a@b", "a@.com", "a@b..com", "dos@@x.com"] {
            assert!(EmailAddress::parse(raw).is_err(), "{raw:?} should be invalid");
        }
    }

    // ── Phone normalization ──────────────────────────────────────────

    #[test]
    fn test_phone_strips_leading_zero_and_prefixes_country() {
        let phone = PhoneNumber::normalize("0991234567", "593").unwrap();
        assert_eq!(phone.as_str(), "+593991234567");
        assert_eq!(phone.digits(), "593991234567");
    }

    #[test]
    fn test_phone_keeps_existing_country_code() {
        let phone = PhoneNumber::normalize("593991234567", "593").unwrap();
        assert_eq!(phone.as_str(), "+593991234567");
    }

    #[test]
    fn test_phone_strips_formatting() {
        let phone = PhoneNumber::normalize("(099) 123-4567", "593").unwrap();
        assert_eq!(phone.as_str(), "+593991234567");
    }

    #[test]
    fn test_phone_rejects_garbage() {
        assert!(PhoneNumber::normalize("abc", "593").is_err());
        assert!(PhoneNumber::normalize("123", "593").is_err());
    }

    // ── Resolution ───────────────────────────────────────────────────

    #[test]
    fn test_resolve_prefers_stored_contact() {
        let recipient = resolve(
            &counterparty(Some("ok@cliente.ec"), None),
            DeliveryChannel::Email,
            "593",
            &NoPrompt,
        )
        .unwrap();
        assert_eq!(recipient, Recipient::Email(EmailAddress::parse("ok@cliente.ec").unwrap()));
    }

    #[test]
    fn test_resolve_falls_back_to_prompt_on_invalid_stored() {
        let prompt = FixedPrompt { email: Some("nuevo@cliente.ec"), phone: None };
        let recipient =
            resolve(&counterparty(Some("roto"), None), DeliveryChannel::Email, "593", &prompt)
                .unwrap();
        assert!(matches!(recipient, Recipient::Email(_)));
    }

    #[test]
    fn test_resolve_aborts_without_contact() {
        let err =
            resolve(&counterparty(None, None), DeliveryChannel::Chat, "593", &NoPrompt).unwrap_err();
        assert!(matches!(err, DeliveryError::MissingContact { .. }));
    }

    #[test]
    fn test_resolve_aborts_on_invalid_prompt_input() {
        let prompt = FixedPrompt { email: None, phone: Some("12") };
        let err = resolve(&counterparty(None, None), DeliveryChannel::Chat, "593", &prompt)
            .unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidRecipient { .. }));
    }
}
