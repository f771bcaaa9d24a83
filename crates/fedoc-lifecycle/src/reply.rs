//! # Transition Reply Probing
//!
//! The lifecycle endpoint wraps failure details in inconsistently shaped
//! envelopes. Rather than model every shape, the reply keeps the raw
//! JSON and probes it for a human-readable message along the known key
//! paths, falling back to a generic line when nothing matches.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown when no probe path yields a message.
pub const GENERIC_FAILURE: &str = "la operación no pudo completarse";

/// The lifecycle endpoint's answer to a transition request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionReply {
    /// Whether the backend accepted the transition.
    pub ok: bool,
    /// Top-level detail line, when the envelope carried one.
    pub detail: Option<String>,
    /// The raw nested payload, kept for probing.
    pub nested: Option<Value>,
}

impl TransitionReply {
    /// A plain acceptance.
    pub fn accepted() -> Self {
        Self { ok: true, detail: None, nested: None }
    }

    /// A rejection carrying a raw envelope.
    pub fn rejected(nested: Value) -> Self {
        Self { ok: false, detail: None, nested: Some(nested) }
    }

    /// Extract the failure message.
    ///
    /// Probes the nested payload in order: `mensaje`, then
    /// `messages[0].message`, then `info`, then `detail`; falls back to
    /// the top-level detail line, then to [`GENERIC_FAILURE`].
    pub fn failure_message(&self) -> String {
        self.nested
            .as_ref()
            .and_then(probe)
            .or_else(|| self.detail.clone())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }
}

fn probe(value: &Value) -> Option<String> {
    string_at(value, "mensaje")
        .or_else(|| {
            value
                .get("messages")
                .and_then(Value::as_array)
                .and_then(|m| m.first())
                .and_then(|m| string_at(m, "message"))
        })
        .or_else(|| string_at(value, "info"))
        .or_else(|| string_at(value, "detail"))
}

fn string_at(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_probe_prefers_mensaje() {
        let reply = TransitionReply::rejected(json!({
            "mensaje": "CLAVE DE ACCESO REGISTRADA",
            "info": "shadowed",
        }));
        assert_eq!(reply.failure_message(), "CLAVE DE ACCESO REGISTRADA");
    }

    #[test]
    fn test_probe_reads_first_nested_message() {
        let reply = TransitionReply::rejected(json!({
            "messages": [
                { "message": "ERROR SECUENCIAL REGISTRADO" },
                { "message": "segundo" },
            ],
        }));
        assert_eq!(reply.failure_message(), "ERROR SECUENCIAL REGISTRADO");
    }

    #[test]
    fn test_probe_falls_through_info_and_detail() {
        let reply = TransitionReply::rejected(json!({ "info": "sin autorización" }));
        assert_eq!(reply.failure_message(), "sin autorización");

        let reply = TransitionReply::rejected(json!({ "detail": "rechazado" }));
        assert_eq!(reply.failure_message(), "rechazado");
    }

    #[test]
    fn test_top_level_detail_used_when_nested_is_opaque() {
        let reply = TransitionReply {
            ok: false,
            detail: Some("timeout aguas arriba".to_string()),
            nested: Some(json!({ "codigo": 70 })),
        };
        assert_eq!(reply.failure_message(), "timeout aguas arriba");
    }

    #[test]
    fn test_generic_fallback() {
        let reply = TransitionReply::rejected(json!({ "codigo": 70 }));
        assert_eq!(reply.failure_message(), GENERIC_FAILURE);

        let empty = TransitionReply::rejected(json!({ "mensaje": "   " }));
        assert_eq!(empty.failure_message(), GENERIC_FAILURE);
    }
}
