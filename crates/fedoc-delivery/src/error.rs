//! # Delivery Errors
//!
//! The user-facing failure modes of a send operation. Strategy-level
//! failures are internal ([`crate::strategy::StrategyError`]) and are
//! swallowed by the chain loop; only the cases here reach the operator.

use thiserror::Error;

use fedoc_core::DeliveryChannel;
use fedoc_pdf::AssembleError;
use fedoc_render::RenderError;

/// A send operation failed before or after the strategy chain.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// No usable contact on the counterparty and none supplied by the
    /// operator. The send never started.
    #[error("no valid {channel} contact for the recipient — delivery aborted")]
    MissingContact {
        /// The channel that needed a contact.
        channel: DeliveryChannel,
    },

    /// A supplied contact failed validation.
    #[error("invalid recipient contact: {detail}")]
    InvalidRecipient {
        /// What was wrong with it.
        detail: String,
    },

    /// Rasterization failed; the send aborted before any side effect.
    #[error("document rendering failed: {0}")]
    Render(#[from] RenderError),

    /// PDF assembly failed; the send aborted before any side effect.
    #[error("pdf assembly failed: {0}")]
    Assemble(#[from] AssembleError),

    /// Every strategy in the chain failed.
    #[error("all {attempts} {channel} delivery strategies failed")]
    AllStrategiesFailed {
        /// The channel whose chain was exhausted.
        channel: DeliveryChannel,
        /// How many strategies were attempted.
        attempts: usize,
    },
}
