//! # Action Gate — Pure Permission Derivation
//!
//! `permitted_actions(document_type, state)` maps a document type and
//! lifecycle state to the set of legal business actions, with a
//! state-aware reason for every denial.
//!
//! ## Policy
//!
//! - `emit`: pre-submission or terminal-failure states.
//! - `authorize`: submission or terminal-failure states (a failed
//!   attempt retries through the same action).
//! - `retry`: terminal-failure states only.
//! - `download`: `AUTHORIZED` **and** not `ANNULLED`. Authorization and
//!   annulment are independent axes; download availability is their
//!   conjunction. Annulment revokes downloads even though the document
//!   was once authorized.
//! - `cancel`: pre-submission states (never submitted → cheap discard).
//! - `delete`: `DRAFT`/`PENDING` only, and only while no authority
//!   response of any kind exists. `GENERATED` and `SIGNED` may already
//!   carry a signature artifact on the server and are excluded.
//! - `annul`: `AUTHORIZED` only. The single path to neutralize an
//!   authorized document; it appends a terminal state and disables
//!   downloads, deleting nothing.
//!
//! Quotations are commercial documents: the fiscal axes
//! (emit/authorize/retry/annul) are always denied, and download is
//! available from any non-cancelled state.

use fedoc_core::DocumentType;

use crate::vocabulary::DocState;

// ─── Actions ─────────────────────────────────────────────────────────

/// The business actions the gate decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Submit the document to the tax authority.
    Emit,
    /// Ask the authority for an authorization verdict.
    Authorize,
    /// Re-enter the submission group after a failure.
    Retry,
    /// Download the signed artifact / print rendition.
    Download,
    /// Discard a never-submitted document.
    Cancel,
    /// Hard-delete a document with no server-side trace.
    Delete,
    /// Neutralize an authorized document.
    Annul,
}

/// All gated actions, in display order.
pub const ALL_ACTIONS: [Action; 7] = [
    Action::Emit,
    Action::Authorize,
    Action::Retry,
    Action::Download,
    Action::Cancel,
    Action::Delete,
    Action::Annul,
];

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Emit => "emit",
            Self::Authorize => "authorize",
            Self::Retry => "retry",
            Self::Download => "download",
            Self::Cancel => "cancel",
            Self::Delete => "delete",
            Self::Annul => "annul",
        };
        // pad() honors width/alignment flags; write_str would not.
        f.pad(s)
    }
}

// ─── Action set ──────────────────────────────────────────────────────

/// The permitted-action booleans for one (document type, state) pair.
///
/// Produced only by [`permitted_actions`]; carries its inputs so denial
/// reasons can be derived from the same state the booleans came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSet {
    document_type: DocumentType,
    state: DocState,
    /// Submit to the authority.
    pub emit: bool,
    /// Request an authorization verdict.
    pub authorize: bool,
    /// Retry after a recoverable failure.
    pub retry: bool,
    /// Download signed artifact / print rendition.
    pub download: bool,
    /// Discard a never-submitted document.
    pub cancel: bool,
    /// Hard-delete.
    pub delete: bool,
    /// Neutralize an authorized document.
    pub annul: bool,
}

impl ActionSet {
    /// Whether the given action is permitted.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Emit => self.emit,
            Action::Authorize => self.authorize,
            Action::Retry => self.retry,
            Action::Download => self.download,
            Action::Cancel => self.cancel,
            Action::Delete => self.delete,
            Action::Annul => self.annul,
        }
    }

    /// A user-facing reason why the action is denied, or `None` if it is
    /// permitted. Reasons are specific to the current state, not generic
    /// failures.
    pub fn denial_reason(&self, action: Action) -> Option<String> {
        if self.allows(action) {
            return None;
        }
        let state = self.state;
        let reason = match action {
            _ if state == DocState::Annulled => {
                format!("document is annulled — {action} is no longer available")
            }
            Action::Download if !self.document_type.is_fiscal() => {
                "quotation was cancelled — nothing to download".to_string()
            }
            Action::Emit | Action::Authorize | Action::Retry | Action::Annul
                if !self.document_type.is_fiscal() =>
            {
                format!("{} is not a fiscal document — {action} does not apply", self.document_type)
            }
            Action::Emit | Action::Cancel | Action::Delete if state == DocState::Authorized => {
                format!("already authorized — annul instead of {action}")
            }
            Action::Delete if state.has_authority_response() => {
                "has an authority response — cannot edit or delete; reverse with a credit note"
                    .to_string()
            }
            Action::Delete => {
                format!("state {state} may already carry a signed artifact — cancel instead")
            }
            Action::Download => {
                format!("not authorized yet (state {state}) — download is unavailable")
            }
            Action::Annul => {
                format!("only an authorized document can be annulled (state is {state})")
            }
            Action::Retry => format!("nothing to retry from state {state}"),
            Action::Emit => format!("cannot emit from state {state}"),
            Action::Authorize => format!("cannot request authorization from state {state}"),
            Action::Cancel => {
                format!("already submitted (state {state}) — cancellation window has closed")
            }
        };
        Some(reason)
    }
}

// ─── The gate ────────────────────────────────────────────────────────

/// Compute the permitted actions for a document type in a given state.
///
/// Pure: depends on its two inputs only. Every page derives its buttons
/// from this one function; there are no per-document-type rule copies.
pub fn permitted_actions(document_type: DocumentType, state: DocState) -> ActionSet {
    let fiscal = document_type.is_fiscal();
    let pre = state.is_pre_submission();
    let failed = state.is_terminal_failure();

    let download = if fiscal {
        // Independent axes: authorization grants, annulment revokes.
        state == DocState::Authorized && state != DocState::Annulled
    } else {
        state != DocState::Cancelled
    };

    ActionSet {
        document_type,
        state,
        emit: fiscal && (pre || failed) && state != DocState::Annulled,
        authorize: fiscal && (state.is_submission() || failed) && state != DocState::Annulled,
        retry: fiscal && failed,
        download,
        cancel: pre,
        delete: matches!(state, DocState::Draft | DocState::Pending)
            && !state.has_authority_response(),
        annul: fiscal && state == DocState::Authorized,
    }
}
