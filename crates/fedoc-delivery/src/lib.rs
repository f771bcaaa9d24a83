//! # fedoc-delivery — Multi-Channel Document Delivery
//!
//! Delivers a rendered document to a human recipient over email or chat
//! messaging, degrading gracefully across runtime capability tiers
//! (mobile vs desktop, native share support, backend connectivity).
//!
//! ## Strategy Chains
//!
//! Each channel is an ordered list of [`DeliveryStrategy`] objects tried
//! strictly sequentially — never in parallel, because each step may
//! perform an observable side effect (a download, an app launch). The
//! first success wins; individual failures are swallowed and logged;
//! only the exhaustion of the whole chain is a user-facing error.
//!
//! Email: backend transport with a locally rendered attachment → backend
//! transport with the server-side rendition → native share sheet →
//! local download plus a prefilled `mailto:` compose link.
//!
//! Chat: native share sheet (mobile with share support only) → local
//! download, app deep link, then — after a fixed grace delay, because
//! there is no reliable signal that the native app opened — the
//! guaranteed web chat link.
//!
//! ## Bookkeeping
//!
//! A successful terminal step appends one entry to the document's
//! delivery history through a best-effort [`HistorySink`]; a sink
//! failure is logged and never surfaced, since the message already left.

pub mod chat;
pub mod email;
pub mod error;
pub mod history;
pub mod message;
pub mod orchestrator;
pub mod platform;
pub mod recipient;
pub mod strategy;
pub mod transport;

// ─── Recipient re-exports ───────────────────────────────────────────

pub use recipient::{ContactPrompt, EmailAddress, NoPrompt, PhoneNumber, Recipient};

// ─── Strategy re-exports ────────────────────────────────────────────

pub use strategy::{DeliveryContext, DeliveryStrategy, RenderedArtifact, StrategyError};

// ─── Chain re-exports ───────────────────────────────────────────────

pub use chat::{chat_chain, DEEP_LINK_GRACE};
pub use email::email_chain;

// ─── Orchestrator re-exports ────────────────────────────────────────

pub use error::DeliveryError;
pub use history::{HistoryError, HistorySink, InMemoryHistory};
pub use message::MessageBody;
pub use orchestrator::DeliveryOrchestrator;
pub use platform::{Platform, PlatformError};
pub use transport::{EmailPayload, TransportApi, TransportError};
