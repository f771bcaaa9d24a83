//! # Lifecycle Controller
//!
//! Drives one document through its fiscal lifecycle. Every operation
//! follows the same discipline:
//!
//! 1. Claim the per-action busy flag (reentrancy guard).
//! 2. Check the action gate against the current state — a denial never
//!    reaches the network.
//! 3. Call the backend and interpret the reply envelope.
//! 4. Refetch the document unconditionally. The backend is the source
//!    of truth for state; the local copy is never patched by hand, even
//!    when the transition was rejected, because a rejection can still
//!    have moved the server-side state.

use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use fedoc_core::{DeliveryChannel, DeliveryRecord, DocumentId, ElectronicDocument};
use fedoc_delivery::{DeliveryOrchestrator, Platform};
use fedoc_state::{permitted_actions, Action, ActionSet, DocState};

use crate::api::{ArtifactApi, ArtifactKind, DocumentStore, LifecycleApi};
use crate::busy::{BusyGuard, SendGuard};
use crate::error::LifecycleError;

/// Controls lifecycle transitions, downloads, and delivery for one
/// loaded document.
pub struct LifecycleController {
    store: Arc<dyn DocumentStore>,
    lifecycle: Arc<dyn LifecycleApi>,
    artifacts: Arc<dyn ArtifactApi>,
    platform: Arc<dyn Platform>,
    delivery: Arc<DeliveryOrchestrator>,
    busy: BusyGuard,
    send_busy: SendGuard,
    document: RwLock<Option<ElectronicDocument>>,
}

impl LifecycleController {
    /// Wire up a controller. No document is loaded yet.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        lifecycle: Arc<dyn LifecycleApi>,
        artifacts: Arc<dyn ArtifactApi>,
        platform: Arc<dyn Platform>,
        delivery: Arc<DeliveryOrchestrator>,
    ) -> Self {
        Self {
            store,
            lifecycle,
            artifacts,
            platform,
            delivery,
            busy: BusyGuard::default(),
            send_busy: SendGuard::default(),
            document: RwLock::new(None),
        }
    }

    /// Load (or reload) a document from the store.
    pub async fn load(&self, id: DocumentId) -> Result<ElectronicDocument, LifecycleError> {
        let document = self.store.fetch(id).await?;
        self.store_document(document.clone());
        Ok(document)
    }

    /// A clone of the currently loaded document.
    pub fn current(&self) -> Result<ElectronicDocument, LifecycleError> {
        let guard = self.document.read().unwrap_or_else(|e| e.into_inner());
        guard.clone().ok_or(LifecycleError::NotLoaded)
    }

    /// The permitted actions for the loaded document, derived fresh from
    /// its current state label.
    pub fn available_actions(&self) -> Result<ActionSet, LifecycleError> {
        let document = self.current()?;
        let state = DocState::parse(&document.state)?;
        Ok(permitted_actions(document.document_type, state))
    }

    // ─── Transitions ─────────────────────────────────────────────────

    /// Submit the document to the tax authority.
    pub async fn emit(&self) -> Result<ElectronicDocument, LifecycleError> {
        self.run_transition(Action::Emit, None).await
    }

    /// Ask the authority for an authorization verdict.
    pub async fn authorize(&self) -> Result<ElectronicDocument, LifecycleError> {
        self.run_transition(Action::Authorize, None).await
    }

    /// Re-enter the submission pipeline after a recoverable failure.
    pub async fn retry(&self) -> Result<ElectronicDocument, LifecycleError> {
        self.run_transition(Action::Retry, None).await
    }

    /// Discard a never-submitted document. Requires a justification.
    pub async fn cancel(&self, justification: &str) -> Result<ElectronicDocument, LifecycleError> {
        let justification = require_justification(justification)?;
        self.run_transition(Action::Cancel, Some(justification)).await
    }

    /// Neutralize an authorized document. Requires a justification.
    pub async fn annul(&self, justification: &str) -> Result<ElectronicDocument, LifecycleError> {
        let justification = require_justification(justification)?;
        self.run_transition(Action::Annul, Some(justification)).await
    }

    /// Hard-delete the loaded document. On acceptance the controller
    /// unloads; there is nothing left to refetch.
    pub async fn delete(&self) -> Result<(), LifecycleError> {
        let _token =
            self.busy.acquire(Action::Delete).ok_or(LifecycleError::Busy { action: Action::Delete })?;
        let document = self.current()?;
        self.check_gate(&document, Action::Delete)?;

        let reply = self.lifecycle.transition(document.id, Action::Delete, None).await?;
        if reply.ok {
            info!(document = %document.sequence, "document deleted");
            *self.document.write().unwrap_or_else(|e| e.into_inner()) = None;
            Ok(())
        } else {
            self.refetch(document.id).await?;
            Err(LifecycleError::Rejected { message: reply.failure_message() })
        }
    }

    // ─── Artifacts and delivery ──────────────────────────────────────

    /// Download a signed artifact to the local device. Returns the
    /// filename it was saved under.
    pub async fn download(&self, kind: ArtifactKind) -> Result<String, LifecycleError> {
        let _token = self
            .busy
            .acquire(Action::Download)
            .ok_or(LifecycleError::Busy { action: Action::Download })?;
        let document = self.current()?;
        self.check_gate(&document, Action::Download)?;

        let bytes = self.artifacts.fetch_artifact(document.id, kind).await?;
        let filename = format!("{}.{}", document.sequence, kind.extension());
        self.platform.download_file(&filename, &bytes).await?;
        debug!(document = %document.sequence, %filename, "artifact downloaded");
        Ok(filename)
    }

    /// Deliver the document over a channel and attach the resulting
    /// record to the local copy.
    pub async fn send(&self, channel: DeliveryChannel) -> Result<DeliveryRecord, LifecycleError> {
        let _token =
            self.send_busy.acquire(channel).ok_or(LifecycleError::SendBusy { channel })?;
        let document = self.current()?;
        let record = self.delivery.send(&document, channel).await?;

        let mut guard = self.document.write().unwrap_or_else(|e| e.into_inner());
        if let Some(document) = guard.as_mut() {
            document.record_delivery(record.clone());
        }
        Ok(record)
    }

    // ─── Internals ───────────────────────────────────────────────────

    async fn run_transition(
        &self,
        action: Action,
        justification: Option<&str>,
    ) -> Result<ElectronicDocument, LifecycleError> {
        let _token =
            self.busy.acquire(action).ok_or(LifecycleError::Busy { action })?;
        let document = self.current()?;
        self.check_gate(&document, action)?;

        let reply = self.lifecycle.transition(document.id, action, justification).await?;

        // Resync from the server before interpreting the verdict.
        let refreshed = self.refetch(document.id).await?;
        if reply.ok {
            info!(document = %document.sequence, %action, state = %refreshed.state, "transition accepted");
            Ok(refreshed)
        } else {
            let message = reply.failure_message();
            debug!(document = %document.sequence, %action, %message, "transition rejected");
            Err(LifecycleError::Rejected { message })
        }
    }

    fn check_gate(
        &self,
        document: &ElectronicDocument,
        action: Action,
    ) -> Result<(), LifecycleError> {
        let state = DocState::parse(&document.state)?;
        let set = permitted_actions(document.document_type, state);
        if set.allows(action) {
            Ok(())
        } else {
            let reason = set
                .denial_reason(action)
                .unwrap_or_else(|| format!("{action} is not available"));
            Err(LifecycleError::PermissionDenied { action, reason })
        }
    }

    async fn refetch(&self, id: DocumentId) -> Result<ElectronicDocument, LifecycleError> {
        let refreshed = self.store.fetch(id).await?;
        self.store_document(refreshed.clone());
        Ok(refreshed)
    }

    fn store_document(&self, document: ElectronicDocument) {
        *self.document.write().unwrap_or_else(|e| e.into_inner()) = Some(document);
    }
}

fn require_justification(raw: &str) -> Result<&str, LifecycleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LifecycleError::Validation(
            "a non-empty justification is required".to_string(),
        ));
    }
    Ok(trimmed)
}
