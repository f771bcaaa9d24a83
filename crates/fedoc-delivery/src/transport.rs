//! # Backend Transport API
//!
//! The external email endpoint the first two email strategies call. The
//! backend substitutes its own server-side rendition when no attachment
//! is supplied.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The transport call failed.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The endpoint was unreachable or returned a transport-level error.
    #[error("transport failed: {0}")]
    Failed(String),
}

/// Payload for the backend email endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPayload {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Inline-encoded PDF attachment; `None` asks the backend to attach
    /// its own rendition.
    pub attachment_base64: Option<String>,
    /// Attachment filename, when an attachment is supplied.
    pub filename: Option<String>,
}

/// The backend email endpoint.
#[async_trait]
pub trait TransportApi: Send + Sync {
    /// Submit one email for sending.
    async fn send_email(&self, payload: &EmailPayload) -> Result<(), TransportError>;
}
