//! # Per-Action Reentrancy Guard
//!
//! One in-flight invocation per action: a double-click on "emit" must
//! not produce two backend submissions. Each action owns an atomic flag;
//! acquiring yields an RAII token that clears the flag on drop, so the
//! guard releases on every exit path, panics included.

use std::sync::atomic::{AtomicBool, Ordering};

use fedoc_core::DeliveryChannel;
use fedoc_state::{Action, ALL_ACTIONS};

/// Tracks which actions are currently in flight.
#[derive(Debug)]
pub struct BusyGuard {
    flags: [AtomicBool; ALL_ACTIONS.len()],
}

impl Default for BusyGuard {
    fn default() -> Self {
        Self { flags: std::array::from_fn(|_| AtomicBool::new(false)) }
    }
}

impl BusyGuard {
    /// Try to claim an action. `None` means the same action is already
    /// in flight.
    pub fn acquire(&self, action: Action) -> Option<BusyToken<'_>> {
        let slot = &self.flags[action as usize];
        if slot.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(BusyToken { slot })
        }
    }

    /// Whether an action is currently in flight.
    pub fn is_busy(&self, action: Action) -> bool {
        self.flags[action as usize].load(Ordering::Acquire)
    }
}

/// Tracks which delivery channels have a send in flight. Sends are not
/// gate actions but follow the same one-in-flight rule: a double-click
/// must not reach the recipient twice.
#[derive(Debug)]
pub struct SendGuard {
    flags: [AtomicBool; 2],
}

impl Default for SendGuard {
    fn default() -> Self {
        Self { flags: std::array::from_fn(|_| AtomicBool::new(false)) }
    }
}

impl SendGuard {
    fn slot(&self, channel: DeliveryChannel) -> &AtomicBool {
        match channel {
            DeliveryChannel::Email => &self.flags[0],
            DeliveryChannel::Chat => &self.flags[1],
        }
    }

    /// Try to claim a channel. `None` means a send on the same channel
    /// is already in flight.
    pub fn acquire(&self, channel: DeliveryChannel) -> Option<BusyToken<'_>> {
        let slot = self.slot(channel);
        if slot.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(BusyToken { slot })
        }
    }

    /// Whether a send is in flight on the channel.
    pub fn is_busy(&self, channel: DeliveryChannel) -> bool {
        self.slot(channel).load(Ordering::Acquire)
    }
}

/// Releases the claimed action when dropped.
#[derive(Debug)]
pub struct BusyToken<'a> {
    slot: &'a AtomicBool,
}

impl Drop for BusyToken<'_> {
    fn drop(&mut self) {
        self.slot.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_while_held() {
        let guard = BusyGuard::default();
        let token = guard.acquire(Action::Emit);
        assert!(token.is_some());
        assert!(guard.acquire(Action::Emit).is_none());
        assert!(guard.is_busy(Action::Emit));
    }

    #[test]
    fn test_actions_are_independent() {
        let guard = BusyGuard::default();
        let _emit = guard.acquire(Action::Emit).unwrap();
        assert!(guard.acquire(Action::Annul).is_some());
    }

    #[test]
    fn test_drop_releases() {
        let guard = BusyGuard::default();
        drop(guard.acquire(Action::Retry).unwrap());
        assert!(!guard.is_busy(Action::Retry));
        assert!(guard.acquire(Action::Retry).is_some());
    }

    // ── Send guard ───────────────────────────────────────────────────

    #[test]
    fn test_send_channels_are_independent() {
        let guard = SendGuard::default();
        let _email = guard.acquire(DeliveryChannel::Email).unwrap();
        assert!(guard.acquire(DeliveryChannel::Email).is_none());
        assert!(guard.is_busy(DeliveryChannel::Email));
        assert!(guard.acquire(DeliveryChannel::Chat).is_some());
    }

    #[test]
    fn test_send_drop_releases() {
        let guard = SendGuard::default();
        drop(guard.acquire(DeliveryChannel::Chat).unwrap());
        assert!(!guard.is_busy(DeliveryChannel::Chat));
    }
}
