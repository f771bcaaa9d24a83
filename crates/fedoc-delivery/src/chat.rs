//! # Chat Strategy Chain
//!
//! Two tiers. On a mobile runtime with file sharing, the artifact goes
//! straight to the native share sheet with the chat one-liner. Otherwise
//! the artifact is downloaded locally, the messenger deep link is tried,
//! and after a fixed grace interval the web fallback link opens
//! regardless — the runtime cannot observe whether the deep link
//! actually landed in an installed app.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::message::url_encode;
use crate::platform::Platform;
use crate::recipient::{PhoneNumber, Recipient};
use crate::strategy::{DeliveryContext, DeliveryStrategy, StrategyError};

/// How long to wait after firing the deep link before opening the web
/// fallback.
pub const DEEP_LINK_GRACE: Duration = Duration::from_millis(1500);

fn phone_recipient<'a>(ctx: &'a DeliveryContext<'_>) -> Result<&'a PhoneNumber, StrategyError> {
    match ctx.recipient {
        Recipient::Phone(phone) => Ok(phone),
        Recipient::Email(_) => Err(StrategyError::WrongRecipient("phone")),
    }
}

// ─── Tier 1: native share ───────────────────────────────────────────

/// Share the artifact through the native sheet (mobile runtimes).
pub struct ChatNativeShare {
    platform: Arc<dyn Platform>,
}

#[async_trait]
impl DeliveryStrategy for ChatNativeShare {
    fn name(&self) -> &'static str {
        "chat-native-share"
    }

    async fn attempt(&self, ctx: &DeliveryContext<'_>) -> Result<(), StrategyError> {
        phone_recipient(ctx)?;
        if !(self.platform.is_mobile() && self.platform.can_share_files()) {
            return Err(StrategyError::NotApplicable("not a mobile share runtime"));
        }
        self.platform
            .share_file(ctx.filename, &ctx.artifact.pdf_bytes, &ctx.message.body)
            .await?;
        Ok(())
    }
}

// ─── Tier 2: download + deep link ───────────────────────────────────

/// Download the artifact, fire the messenger deep link, then the web
/// fallback after [`DEEP_LINK_GRACE`].
pub struct ChatLinkFallback {
    platform: Arc<dyn Platform>,
}

#[async_trait]
impl DeliveryStrategy for ChatLinkFallback {
    fn name(&self) -> &'static str {
        "chat-link-fallback"
    }

    async fn attempt(&self, ctx: &DeliveryContext<'_>) -> Result<(), StrategyError> {
        let phone = phone_recipient(ctx)?;
        self.platform.download_file(ctx.filename, &ctx.artifact.pdf_bytes).await?;

        let text = url_encode(&ctx.message.body);
        let deep = format!("whatsapp://send?phone={}&text={text}", phone.digits());
        let web = format!("https://wa.me/{}?text={text}", phone.digits());

        // A dead deep link fails silently; the web link always follows.
        if let Err(error) = self.platform.open_link(&deep).await {
            tracing::debug!(%error, "messenger deep link failed");
        }
        tokio::time::sleep(DEEP_LINK_GRACE).await;
        self.platform.open_link(&web).await?;
        Ok(())
    }
}

/// The ordered chat chain.
pub fn chat_chain(platform: Arc<dyn Platform>) -> Vec<Box<dyn DeliveryStrategy>> {
    vec![
        Box::new(ChatNativeShare { platform: Arc::clone(&platform) }),
        Box::new(ChatLinkFallback { platform }),
    ]
}
