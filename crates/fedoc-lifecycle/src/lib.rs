//! # fedoc-lifecycle — Document Lifecycle Control
//!
//! Drives electronic documents through their fiscal lifecycle against
//! the authority backend: emission, authorization polling, retry after
//! recoverable failure, cancellation, deletion, annulment, artifact
//! downloads, and delivery hand-off.
//!
//! ## Design
//!
//! The controller never decides permissions itself — it asks the pure
//! gate in `fedoc-state` and refuses locally, with the gate's own
//! reason, before any network traffic. Backend replies arrive in
//! inconsistently shaped envelopes; `reply.rs` probes them along the
//! known key paths rather than modeling each shape. After every
//! transition the document is refetched from the store unconditionally:
//! the backend owns the state, the local copy is a cache.
//!
//! Each action carries its own reentrancy flag (`busy.rs`); a
//! double-triggered emission reaches the backend exactly once.

pub mod api;
pub mod busy;
pub mod controller;
pub mod error;
pub mod reply;

// ─── API seam re-exports ────────────────────────────────────────────

pub use api::{ApiError, ArtifactApi, ArtifactKind, DocumentStore, LifecycleApi};

// ─── Controller re-exports ──────────────────────────────────────────

pub use busy::{BusyGuard, BusyToken, SendGuard};
pub use controller::LifecycleController;
pub use error::LifecycleError;
pub use reply::{TransitionReply, GENERIC_FAILURE};
