//! # Delivery Orchestrator
//!
//! Runs one send end to end: resolve the recipient, compose the message,
//! render the artifact, then walk the channel's strategy chain until one
//! tier succeeds. Rendering happens before any strategy runs, so a
//! render failure aborts with zero side effects. The artifact lives only
//! for the duration of the call.

use std::sync::Arc;

use tracing::{debug, warn};

use fedoc_core::{
    DeliveryChannel, DeliveryOutcome, DeliveryRecord, DocumentType, ElectronicDocument, Timestamp,
};
use fedoc_pdf::PdfAssembler;
use fedoc_render::{Branding, ImageSource, Renderer, Template};

use crate::chat::chat_chain;
use crate::email::email_chain;
use crate::error::DeliveryError;
use crate::history::HistorySink;
use crate::message::MessageBody;
use crate::platform::Platform;
use crate::recipient::{self, ContactPrompt};
use crate::strategy::{DeliveryContext, DeliveryStrategy, RenderedArtifact};
use crate::transport::TransportApi;

/// Drives document delivery across channels.
pub struct DeliveryOrchestrator {
    transport: Arc<dyn TransportApi>,
    platform: Arc<dyn Platform>,
    history: Arc<dyn HistorySink>,
    prompt: Arc<dyn ContactPrompt>,
    images: Arc<dyn ImageSource + Send + Sync>,
    branding: Branding,
    country_code: String,
    device_scale: f32,
}

impl DeliveryOrchestrator {
    /// Wire up an orchestrator. `country_code` is the digits-only
    /// calling code used to normalize chat phone numbers;
    /// `device_scale` is the runtime pixel ratio passed to the renderer.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transport: Arc<dyn TransportApi>,
        platform: Arc<dyn Platform>,
        history: Arc<dyn HistorySink>,
        prompt: Arc<dyn ContactPrompt>,
        images: Arc<dyn ImageSource + Send + Sync>,
        branding: Branding,
        country_code: String,
        device_scale: f32,
    ) -> Self {
        Self { transport, platform, history, prompt, images, branding, country_code, device_scale }
    }

    /// Deliver a document over a channel.
    ///
    /// On success returns the [`DeliveryRecord`] that was (best-effort)
    /// appended to the history sink; the caller is responsible for
    /// attaching it to its own copy of the document.
    pub async fn send(
        &self,
        document: &ElectronicDocument,
        channel: DeliveryChannel,
    ) -> Result<DeliveryRecord, DeliveryError> {
        let recipient =
            recipient::resolve(&document.counterparty, channel, &self.country_code, &*self.prompt)?;
        let message = MessageBody::compose(channel, document, &self.branding.company_name);
        let artifact = self.render(document)?;
        let filename = attachment_filename(document);

        let chain: Vec<Box<dyn DeliveryStrategy>> = match channel {
            DeliveryChannel::Email => {
                email_chain(Arc::clone(&self.transport), Arc::clone(&self.platform))
            }
            DeliveryChannel::Chat => chat_chain(Arc::clone(&self.platform)),
        };
        let attempts = chain.len();

        let ctx = DeliveryContext {
            document,
            recipient: &recipient,
            message: &message,
            artifact: &artifact,
            filename: &filename,
        };

        for strategy in &chain {
            match strategy.attempt(&ctx).await {
                Ok(()) => {
                    let record = DeliveryRecord {
                        channel,
                        timestamp: Timestamp::now(),
                        outcome: DeliveryOutcome::Sent { strategy: strategy.name().to_string() },
                    };
                    if let Err(error) =
                        self.history.append(document.id, record.clone()).await
                    {
                        // The message already left; bookkeeping is best-effort.
                        warn!(%error, document = %document.sequence, "delivery history append failed");
                    }
                    return Ok(record);
                }
                Err(error) => {
                    debug!(strategy = strategy.name(), %error, "delivery strategy failed; trying next");
                }
            }
        }

        Err(DeliveryError::AllStrategiesFailed { channel, attempts })
    }

    /// Rasterize and paginate the document. Fresh on every send; the
    /// result is never cached because document content may change
    /// between sends.
    fn render(&self, document: &ElectronicDocument) -> Result<RenderedArtifact, DeliveryError> {
        let template = Template::compose(document, &self.branding);
        let renderer = Renderer::new(&*self.images, self.device_scale);
        let raster = renderer.rasterize(&template)?;
        let pdf_bytes = PdfAssembler::a4().assemble(&raster)?;
        Ok(RenderedArtifact { raster, pdf_bytes })
    }
}

fn attachment_filename(document: &ElectronicDocument) -> String {
    let slug = match document.document_type {
        DocumentType::Invoice => "factura",
        DocumentType::CreditNote => "nota-credito",
        DocumentType::DebitNote => "nota-debito",
        DocumentType::Quotation => "proforma",
    };
    format!("{slug}-{}.pdf", document.sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use fedoc_core::{Counterparty, LineItem, TaxLine};
    use fedoc_render::NoImages;

    use crate::history::{HistoryError, InMemoryHistory};
    use crate::platform::PlatformError;
    use crate::recipient::NoPrompt;
    use crate::transport::{EmailPayload, TransportError};

    // ── Scripted fakes ───────────────────────────────────────────────

    /// Fails the first `failures` sends, then succeeds.
    struct ScriptedTransport {
        failures: usize,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn failing(failures: usize) -> Self {
            Self { failures, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl TransportApi for ScriptedTransport {
        async fn send_email(&self, _payload: &EmailPayload) -> Result<(), TransportError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(TransportError::Failed("backend unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    struct ScriptedPlatform {
        mobile: bool,
        share: bool,
        share_fails: bool,
        shares: AtomicUsize,
        downloads: Mutex<Vec<String>>,
        links: Mutex<Vec<String>>,
    }

    impl ScriptedPlatform {
        fn desktop() -> Self {
            Self {
                mobile: false,
                share: false,
                share_fails: false,
                shares: AtomicUsize::new(0),
                downloads: Mutex::new(Vec::new()),
                links: Mutex::new(Vec::new()),
            }
        }

        fn mobile_with_share() -> Self {
            Self { mobile: true, share: true, ..Self::desktop() }
        }

        fn links(&self) -> Vec<String> {
            self.links.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Platform for ScriptedPlatform {
        fn is_mobile(&self) -> bool {
            self.mobile
        }

        fn can_share_files(&self) -> bool {
            self.share
        }

        async fn share_file(
            &self,
            _filename: &str,
            _bytes: &[u8],
            _text: &str,
        ) -> Result<(), PlatformError> {
            self.shares.fetch_add(1, Ordering::SeqCst);
            if self.share_fails {
                Err(PlatformError::Failed("share sheet dismissed".to_string()))
            } else {
                Ok(())
            }
        }

        async fn download_file(&self, filename: &str, _bytes: &[u8]) -> Result<(), PlatformError> {
            self.downloads.lock().unwrap().push(filename.to_string());
            Ok(())
        }

        async fn open_link(&self, url: &str) -> Result<(), PlatformError> {
            self.links.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    struct FailingHistory;

    #[async_trait]
    impl HistorySink for FailingHistory {
        async fn append(
            &self,
            _id: fedoc_core::DocumentId,
            _record: DeliveryRecord,
        ) -> Result<(), HistoryError> {
            Err(HistoryError::Failed("store offline".to_string()))
        }
    }

    // ── Fixtures ─────────────────────────────────────────────────────

    fn document() -> ElectronicDocument {
        ElectronicDocument::new_draft(
            DocumentType::Invoice,
            "001-001-000000042".to_string(),
            Counterparty {
                name: "Cliente SA".to_string(),
                tax_id: None,
                email: Some("compras@cliente.ec".to_string()),
                phone: Some("0991234567".to_string()),
            },
            vec![LineItem {
                description: "Widget".to_string(),
                quantity: 1,
                unit_price: 1000,
                discount: 0,
                tax_breakdown: vec![TaxLine { rate_bp: 1500 }],
                thumbnail_ref: None,
            }],
        )
    }

    fn orchestrator(
        transport: Arc<ScriptedTransport>,
        platform: Arc<ScriptedPlatform>,
        history: Arc<dyn HistorySink>,
    ) -> DeliveryOrchestrator {
        DeliveryOrchestrator::new(
            transport,
            platform,
            history,
            Arc::new(NoPrompt),
            Arc::new(NoImages),
            Branding::minimal("EMPRESA", "1790012345001"),
            "593".to_string(),
            1.0,
        )
    }

    // ── Email chain ──────────────────────────────────────────────────

    #[tokio::test]
    async fn test_email_first_tier_succeeds() {
        let transport = Arc::new(ScriptedTransport::failing(0));
        let platform = Arc::new(ScriptedPlatform::desktop());
        let history = Arc::new(InMemoryHistory::default());
        let orch = orchestrator(Arc::clone(&transport), Arc::clone(&platform), history.clone());

        let record = orch.send(&document(), DeliveryChannel::Email).await.unwrap();
        assert_eq!(
            record.outcome,
            DeliveryOutcome::Sent { strategy: "backend-attachment".to_string() }
        );
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(history.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_email_falls_through_to_share_and_stops() {
        // Both backend tiers fail, share succeeds; tier four never runs.
        let transport = Arc::new(ScriptedTransport::failing(2));
        let platform = Arc::new(ScriptedPlatform::mobile_with_share());
        let history = Arc::new(InMemoryHistory::default());
        let orch = orchestrator(Arc::clone(&transport), Arc::clone(&platform), history.clone());

        let record = orch.send(&document(), DeliveryChannel::Email).await.unwrap();
        assert_eq!(record.outcome, DeliveryOutcome::Sent { strategy: "native-share".to_string() });
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
        assert_eq!(platform.shares.load(Ordering::SeqCst), 1);
        assert!(platform.downloads.lock().unwrap().is_empty(), "tier four must not run");
        assert_eq!(history.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_email_last_tier_downloads_and_composes() {
        let transport = Arc::new(ScriptedTransport::failing(2));
        let platform = Arc::new(ScriptedPlatform::desktop());
        let history = Arc::new(InMemoryHistory::default());
        let orch = orchestrator(Arc::clone(&transport), Arc::clone(&platform), history.clone());

        let record = orch.send(&document(), DeliveryChannel::Email).await.unwrap();
        assert_eq!(record.outcome, DeliveryOutcome::Sent { strategy: "download-mailto".to_string() });
        assert_eq!(
            platform.downloads.lock().unwrap().as_slice(),
            ["factura-001-001-000000042.pdf"]
        );
        let links = platform.links();
        assert_eq!(links.len(), 1);
        assert!(links[0].starts_with("mailto:compras@cliente.ec?subject="));
    }

    // ── Chat chain ───────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_chat_desktop_uses_link_fallback() {
        let transport = Arc::new(ScriptedTransport::failing(0));
        let platform = Arc::new(ScriptedPlatform::desktop());
        let history = Arc::new(InMemoryHistory::default());
        let orch = orchestrator(transport, Arc::clone(&platform), history.clone());

        let record = orch.send(&document(), DeliveryChannel::Chat).await.unwrap();
        assert_eq!(
            record.outcome,
            DeliveryOutcome::Sent { strategy: "chat-link-fallback".to_string() }
        );
        let links = platform.links();
        assert_eq!(links.len(), 2, "deep link then web fallback");
        assert!(links[0].starts_with("whatsapp://send?phone=593991234567"));
        assert!(links[1].starts_with("https://wa.me/593991234567"));
        assert_eq!(history.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_chat_mobile_prefers_native_share() {
        let transport = Arc::new(ScriptedTransport::failing(0));
        let platform = Arc::new(ScriptedPlatform::mobile_with_share());
        let history = Arc::new(InMemoryHistory::default());
        let orch = orchestrator(transport, Arc::clone(&platform), history.clone());

        let record = orch.send(&document(), DeliveryChannel::Chat).await.unwrap();
        assert_eq!(
            record.outcome,
            DeliveryOutcome::Sent { strategy: "chat-native-share".to_string() }
        );
        assert!(platform.links().is_empty());
    }

    // ── Aborts and bookkeeping ───────────────────────────────────────

    #[tokio::test]
    async fn test_missing_contact_aborts_before_side_effects() {
        let transport = Arc::new(ScriptedTransport::failing(0));
        let platform = Arc::new(ScriptedPlatform::desktop());
        let history = Arc::new(InMemoryHistory::default());
        let orch = orchestrator(Arc::clone(&transport), Arc::clone(&platform), history.clone());

        let mut doc = document();
        doc.counterparty.email = None;
        let err = orch.send(&doc, DeliveryChannel::Email).await.unwrap_err();
        assert!(matches!(err, DeliveryError::MissingContact { .. }));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
        assert!(history.entries().is_empty());
    }

    #[tokio::test]
    async fn test_history_failure_never_fails_the_send() {
        let transport = Arc::new(ScriptedTransport::failing(0));
        let platform = Arc::new(ScriptedPlatform::desktop());
        let orch =
            orchestrator(Arc::clone(&transport), Arc::clone(&platform), Arc::new(FailingHistory));

        assert!(orch.send(&document(), DeliveryChannel::Email).await.is_ok());
    }
}
