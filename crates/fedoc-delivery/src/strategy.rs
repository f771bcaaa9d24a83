//! # Delivery Strategy Seam
//!
//! The common shape every delivery tier implements: an async
//! `attempt(context)` that either delivers or fails. The chain loop in
//! the orchestrator is the only caller; it tries strategies in order and
//! swallows individual failures.

use async_trait::async_trait;
use thiserror::Error;

use fedoc_core::ElectronicDocument;
use fedoc_render::RasterImage;

use crate::message::MessageBody;
use crate::platform::PlatformError;
use crate::recipient::Recipient;
use crate::transport::TransportError;

/// The rendered print artifact for one send.
///
/// Owned by the orchestrator invocation that created it and discarded
/// afterwards regardless of outcome — never cached across sends, because
/// document content may have changed in between.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    /// The tall raster rendition the PDF was assembled from.
    pub raster: RasterImage,
    /// The paginated PDF bytes.
    pub pdf_bytes: Vec<u8>,
}

/// Everything a strategy step needs, borrowed for the one attempt.
#[derive(Debug)]
pub struct DeliveryContext<'a> {
    /// The document being delivered.
    pub document: &'a ElectronicDocument,
    /// The resolved recipient.
    pub recipient: &'a Recipient,
    /// The composed message.
    pub message: &'a MessageBody,
    /// The rendered artifact.
    pub artifact: &'a RenderedArtifact,
    /// Attachment/download filename.
    pub filename: &'a str,
}

/// One strategy step failed; the chain moves on.
#[derive(Error, Debug)]
pub enum StrategyError {
    /// The backend transport call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// A platform side effect failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),
    /// This strategy does not apply on the current runtime.
    #[error("strategy not applicable: {0}")]
    NotApplicable(&'static str),
    /// The recipient kind does not match the channel this strategy serves.
    #[error("strategy requires a {0} recipient")]
    WrongRecipient(&'static str),
}

/// One tier of a delivery chain.
#[async_trait]
pub trait DeliveryStrategy: Send + Sync {
    /// Short identifier recorded in the delivery history on success.
    fn name(&self) -> &'static str;

    /// Try to deliver. An `Err` advances the chain to the next tier.
    async fn attempt(&self, ctx: &DeliveryContext<'_>) -> Result<(), StrategyError>;
}
