//! # Lifecycle Errors
//!
//! Everything a controller operation can surface to the operator. Gate
//! denials carry the state-aware reason the gate computed; backend
//! rejections carry the message probed out of the reply envelope.

use thiserror::Error;

use fedoc_core::DeliveryChannel;
use fedoc_delivery::{DeliveryError, PlatformError};
use fedoc_state::{Action, StateError};

use crate::api::ApiError;

/// A controller operation failed.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// No document is loaded in the controller.
    #[error("no document loaded")]
    NotLoaded,

    /// The action gate denied the operation before any network work.
    #[error("{action} denied: {reason}")]
    PermissionDenied {
        /// The denied action.
        action: Action,
        /// The gate's state-aware reason.
        reason: String,
    },

    /// The same action is already in flight.
    #[error("{action} is already in progress")]
    Busy {
        /// The contended action.
        action: Action,
    },

    /// A send on the same channel is already in flight.
    #[error("{channel} delivery is already in progress")]
    SendBusy {
        /// The contended channel.
        channel: DeliveryChannel,
    },

    /// Operator input failed validation.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The backend acknowledged the request but rejected the transition.
    #[error("transition rejected: {message}")]
    Rejected {
        /// Message probed from the reply envelope.
        message: String,
    },

    /// The upstream state label is outside the known vocabulary.
    #[error(transparent)]
    State(#[from] StateError),

    /// A backend call failed at the transport level.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Document delivery failed.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// Saving a downloaded artifact failed.
    #[error("artifact download failed: {0}")]
    Platform(#[from] PlatformError),
}
