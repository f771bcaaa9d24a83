//! # fedoc-cli — FEDOC Command-Line Interface
//!
//! Offline tooling around the FEDOC crates. Everything here works from
//! document JSON on disk; nothing talks to a backend.
//!
//! ## Subcommands
//!
//! - `render` — rasterize a document and write the paginated PDF
//! - `actions` — show the action gate's verdict for a document
//! - `contact` — validate and normalize an email or phone contact
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no business logic here.

pub mod actions;
pub mod contact;
pub mod render;
