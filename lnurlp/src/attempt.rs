//! Staleness tracking for resolution attempts.
//!
//! A collaborator resolves an invoice for a snapshot of its inputs. When the
//! inputs change mid-flight the old attempt keeps running, but its result
//! must never be applied. [`AttemptTracker`] hands out monotonically
//! increasing generations; only the latest generation may apply.

use std::sync::{Mutex, PoisonError};

use crate::amount::AmountSats;

/// Inputs a resolution attempt was started with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttemptKey {
    /// Raw address, as entered.
    pub address: String,
    /// Amount in satoshis.
    pub amount: AmountSats,
    /// Payer message, possibly empty.
    pub message: String,
}

impl AttemptKey {
    /// Creates a key.
    pub fn new(address: impl Into<String>, amount: AmountSats, message: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            amount,
            message: message.into(),
        }
    }

    /// Returns the message as an optional comment; empty means none.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        (!self.message.is_empty()).then_some(self.message.as_str())
    }
}

/// Proof that an attempt was started, checked before applying its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptTicket {
    generation: u64,
    key: AttemptKey,
}

impl AttemptTicket {
    /// Generation number of this attempt.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Inputs of this attempt.
    #[must_use]
    pub const fn key(&self) -> &AttemptKey {
        &self.key
    }
}

#[derive(Debug, Default)]
struct Inner {
    generation: u64,
    key: Option<AttemptKey>,
}

/// Generation counter guarding against stale results.
#[derive(Debug, Default)]
pub struct AttemptTracker {
    inner: Mutex<Inner>,
}

impl AttemptTracker {
    /// Creates a tracker with no attempt started.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new attempt, superseding any in flight.
    pub fn begin(&self, key: AttemptKey) -> AttemptTicket {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.key = Some(key.clone());
        AttemptTicket {
            generation: inner.generation,
            key,
        }
    }

    /// Starts a new attempt unless the current one has the same inputs.
    pub fn begin_if_changed(&self, key: AttemptKey) -> Option<AttemptTicket> {
        let mut inner = self.lock();
        if inner.key.as_ref() == Some(&key) {
            return None;
        }
        inner.generation += 1;
        inner.key = Some(key.clone());
        Some(AttemptTicket {
            generation: inner.generation,
            key,
        })
    }

    /// Returns `true` if no newer attempt has started since `ticket`.
    #[must_use]
    pub fn is_current(&self, ticket: &AttemptTicket) -> bool {
        self.lock().generation == ticket.generation
    }

    /// Runs `apply` only if `ticket` is still current.
    ///
    /// The check and the call happen under the same lock, so a concurrent
    /// [`begin`](Self::begin) cannot slip in between.
    pub fn apply<R>(&self, ticket: &AttemptTicket, apply: impl FnOnce() -> R) -> Option<R> {
        let inner = self.lock();
        (inner.generation == ticket.generation).then(apply)
    }

    /// Inputs of the latest attempt.
    #[must_use]
    pub fn current_key(&self) -> Option<AttemptKey> {
        self.lock().key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(address: &str, sats: u64, message: &str) -> AttemptKey {
        AttemptKey::new(address, AmountSats::new(sats).unwrap(), message)
    }

    #[test]
    fn test_newer_attempt_supersedes() {
        let tracker = AttemptTracker::new();
        let first = tracker.begin(key("a@x", 1, ""));
        assert!(tracker.is_current(&first));

        let second = tracker.begin(key("b@x", 1, ""));
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));

        assert_eq!(tracker.apply(&first, || "stale"), None);
        assert_eq!(tracker.apply(&second, || "fresh"), Some("fresh"));
    }

    #[test]
    fn test_same_inputs_not_restarted() {
        let tracker = AttemptTracker::new();
        let first = tracker.begin_if_changed(key("a@x", 1, "hi")).unwrap();
        assert!(tracker.begin_if_changed(key("a@x", 1, "hi")).is_none());
        assert!(tracker.is_current(&first));

        let changed = tracker.begin_if_changed(key("a@x", 2, "hi")).unwrap();
        assert!(changed.generation() > first.generation());
        assert_eq!(tracker.current_key(), Some(key("a@x", 2, "hi")));
    }

    #[test]
    fn test_reverting_inputs_starts_new_generation() {
        let tracker = AttemptTracker::new();
        let a = tracker.begin(key("a@x", 1, ""));
        tracker.begin(key("b@x", 1, ""));
        let a_again = tracker.begin_if_changed(key("a@x", 1, "")).unwrap();
        assert_eq!(a.key(), a_again.key());
        assert!(!tracker.is_current(&a));
        assert!(tracker.is_current(&a_again));
    }

    #[test]
    fn test_comment_from_message() {
        assert_eq!(key("a@x", 1, "").comment(), None);
        assert_eq!(key("a@x", 1, "hi").comment(), Some("hi"));
    }
}
