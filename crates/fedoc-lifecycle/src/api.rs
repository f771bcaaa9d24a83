//! # Backend API Seams
//!
//! The three external surfaces the controller talks to: the document
//! store (fetch/refetch), the lifecycle endpoint (transitions), and the
//! artifact endpoint (signed XML and print PDF bytes). The surrounding
//! application implements these against its backend; tests use scripted
//! fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fedoc_core::{DocumentId, ElectronicDocument};
use fedoc_state::Action;

use crate::reply::TransitionReply;

/// A backend call failed before producing a usable reply.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The endpoint was unreachable.
    #[error("backend unreachable: {0}")]
    Network(String),
    /// The endpoint answered with a non-success status and no envelope.
    #[error("backend returned status {status}")]
    Status {
        /// HTTP-level status code.
        status: u16,
    },
    /// The reply body could not be decoded.
    #[error("malformed backend reply: {0}")]
    Decode(String),
}

/// Fetches document records. The controller refetches after every
/// state-changing call instead of trusting its local copy.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the current server-side record.
    async fn fetch(&self, id: DocumentId) -> Result<ElectronicDocument, ApiError>;
}

/// The lifecycle transition endpoint.
#[async_trait]
pub trait LifecycleApi: Send + Sync {
    /// Request one transition. `justification` accompanies annulment and
    /// cancellation; other actions send `None`.
    async fn transition(
        &self,
        id: DocumentId,
        action: Action,
        justification: Option<&str>,
    ) -> Result<TransitionReply, ApiError>;
}

/// Which downloadable artifact to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// The authority-signed XML.
    SignedXml,
    /// The backend's print rendition PDF.
    PrintPdf,
}

impl ArtifactKind {
    /// File extension for the downloaded artifact.
    pub fn extension(self) -> &'static str {
        match self {
            Self::SignedXml => "xml",
            Self::PrintPdf => "pdf",
        }
    }
}

/// The artifact download endpoint.
#[async_trait]
pub trait ArtifactApi: Send + Sync {
    /// Fetch the artifact bytes for an authorized document.
    async fn fetch_artifact(&self, id: DocumentId, kind: ArtifactKind) -> Result<Vec<u8>, ApiError>;
}
