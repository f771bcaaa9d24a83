//! # Email Strategy Chain
//!
//! Four tiers, attempted strictly in order, first success wins:
//!
//! 1. Backend transport with the locally rendered PDF attached inline.
//! 2. Backend transport without the attachment — the backend substitutes
//!    its own server-side rendition.
//! 3. Native share sheet, where the runtime supports file sharing.
//! 4. Local download of the artifact plus a prefilled `mailto:` compose
//!    link; the human attaches the just-downloaded file manually.

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::message::url_encode;
use crate::platform::Platform;
use crate::recipient::{EmailAddress, Recipient};
use crate::strategy::{DeliveryContext, DeliveryStrategy, StrategyError};
use crate::transport::{EmailPayload, TransportApi};

fn email_recipient<'a>(ctx: &'a DeliveryContext<'_>) -> Result<&'a EmailAddress, StrategyError> {
    match ctx.recipient {
        Recipient::Email(address) => Ok(address),
        Recipient::Phone(_) => Err(StrategyError::WrongRecipient("email")),
    }
}

// ─── Tier 1: backend with attachment ────────────────────────────────

/// Submit to the backend transport with the local rendition attached.
pub struct BackendAttachment {
    transport: Arc<dyn TransportApi>,
}

#[async_trait]
impl DeliveryStrategy for BackendAttachment {
    fn name(&self) -> &'static str {
        "backend-attachment"
    }

    async fn attempt(&self, ctx: &DeliveryContext<'_>) -> Result<(), StrategyError> {
        let to = email_recipient(ctx)?;
        let payload = EmailPayload {
            to: to.as_str().to_string(),
            subject: ctx.message.subject.clone(),
            message: ctx.message.body.clone(),
            attachment_base64: Some(BASE64.encode(&ctx.artifact.pdf_bytes)),
            filename: Some(ctx.filename.to_string()),
        };
        self.transport.send_email(&payload).await?;
        Ok(())
    }
}

// ─── Tier 2: backend, server-side rendition ─────────────────────────

/// Retry the backend without the attachment.
pub struct BackendServerRendition {
    transport: Arc<dyn TransportApi>,
}

#[async_trait]
impl DeliveryStrategy for BackendServerRendition {
    fn name(&self) -> &'static str {
        "backend-server-rendition"
    }

    async fn attempt(&self, ctx: &DeliveryContext<'_>) -> Result<(), StrategyError> {
        let to = email_recipient(ctx)?;
        let payload = EmailPayload {
            to: to.as_str().to_string(),
            subject: ctx.message.subject.clone(),
            message: ctx.message.body.clone(),
            attachment_base64: None,
            filename: None,
        };
        self.transport.send_email(&payload).await?;
        Ok(())
    }
}

// ─── Tier 3: native share ───────────────────────────────────────────

/// Hand the artifact to the native share sheet.
pub struct NativeShare {
    platform: Arc<dyn Platform>,
}

#[async_trait]
impl DeliveryStrategy for NativeShare {
    fn name(&self) -> &'static str {
        "native-share"
    }

    async fn attempt(&self, ctx: &DeliveryContext<'_>) -> Result<(), StrategyError> {
        email_recipient(ctx)?;
        if !self.platform.can_share_files() {
            return Err(StrategyError::NotApplicable("no native file sharing"));
        }
        self.platform
            .share_file(ctx.filename, &ctx.artifact.pdf_bytes, &ctx.message.body)
            .await?;
        Ok(())
    }
}

// ─── Tier 4: download + mailto ──────────────────────────────────────

/// Download the artifact locally, then open a prefilled compose link.
pub struct DownloadAndCompose {
    platform: Arc<dyn Platform>,
}

#[async_trait]
impl DeliveryStrategy for DownloadAndCompose {
    fn name(&self) -> &'static str {
        "download-mailto"
    }

    async fn attempt(&self, ctx: &DeliveryContext<'_>) -> Result<(), StrategyError> {
        let to = email_recipient(ctx)?;
        self.platform.download_file(ctx.filename, &ctx.artifact.pdf_bytes).await?;
        let url = format!(
            "mailto:{}?subject={}&body={}",
            to.as_str(),
            url_encode(&ctx.message.subject),
            url_encode(&ctx.message.body),
        );
        self.platform.open_link(&url).await?;
        Ok(())
    }
}

/// The ordered email chain.
pub fn email_chain(
    transport: Arc<dyn TransportApi>,
    platform: Arc<dyn Platform>,
) -> Vec<Box<dyn DeliveryStrategy>> {
    vec![
        Box::new(BackendAttachment { transport: Arc::clone(&transport) }),
        Box::new(BackendServerRendition { transport }),
        Box::new(NativeShare { platform: Arc::clone(&platform) }),
        Box::new(DownloadAndCompose { platform }),
    ]
}
