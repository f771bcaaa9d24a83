//! # fedoc-state — Lifecycle States and Action Gating
//!
//! Interprets the raw state labels carried by [`fedoc_core::ElectronicDocument`]
//! and derives which business actions are legal for a document.
//!
//! ## Modules
//!
//! - **Vocabulary** (`vocabulary.rs`): the 13 canonical lifecycle states,
//!   the gender-tolerant label matcher, Spanish label aliases, and the
//!   transition-group predicates (pre-submission, submission,
//!   terminal-failure, absorbing).
//!
//! - **Gate** (`gate.rs`): `permitted_actions(document_type, state)` — a
//!   pure function from document type and state to the set of permitted
//!   actions, with a state-aware reason for every denial.
//!
//! ## Design
//!
//! Upstream data sources are inconsistent about the grammatical gender of
//! Spanish state suffixes (`AUTORIZADO` vs `AUTORIZADA` name the same
//! state). Raw string equality on state labels is therefore banned across
//! the stack; every comparison goes through [`vocabulary::matches`] or a
//! parsed [`DocState`].
//!
//! The gate is one function, parameterized by document type. Credit
//! notes, debit notes and quotations share a single rule set instead of
//! per-type copies that drift apart.

pub mod gate;
pub mod vocabulary;

// ─── Vocabulary re-exports ──────────────────────────────────────────

pub use vocabulary::{matches, DocState, StateError, ALL_STATES};

// ─── Gate re-exports ────────────────────────────────────────────────

pub use gate::{permitted_actions, Action, ActionSet, ALL_ACTIONS};
