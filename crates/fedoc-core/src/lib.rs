//! # fedoc-core — Foundational Types for the FEDOC Stack
//!
//! This crate is the bedrock of the FEDOC electronic fiscal document
//! stack. It defines the document model and the type-system primitives
//! every other crate builds on. Every other crate in the workspace
//! depends on `fedoc-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `DocumentId`,
//!    `AccessKey`, `AuthorizationNumber`, `TaxId` — all newtypes with
//!    validated constructors. No bare strings for identifiers.
//!
//! 2. **Integer-cent money.** All monetary amounts are `i64` cents.
//!    Floats never enter totals computation, so two renditions of the
//!    same document can never disagree about its grand total.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision; non-UTC inputs are rejected at
//!    construction.
//!
//! 4. **Derived totals.** `Totals` is computed from line items, never
//!    hand-edited. There is no public constructor that accepts
//!    arbitrary totals.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fedoc-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod document;
pub mod error;
pub mod identity;
pub mod temporal;
pub mod totals;

// Re-export primary types for ergonomic imports.
pub use document::{
    Counterparty, DeliveryChannel, DeliveryOutcome, DeliveryRecord, DocumentType,
    ElectronicDocument, LineItem, TaxLine,
};
pub use error::DocumentError;
pub use identity::{AccessKey, AuthorizationNumber, DocumentId, TaxId};
pub use temporal::Timestamp;
pub use totals::{Cents, RateSubtotal, Totals};
