//! Cancellable single-shot timer used to debounce search input.
//!
//! The caller owns the clock: every method takes `now`, which keeps the
//! timer deterministic in tests and lets the event loop decide how long to
//! block (see [`Debouncer::remaining`]).

use std::time::{Duration, Instant};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            deadline: None,
        }
    }

    /// Arm the timer, replacing any pending deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the pending deadline, zero if already due, `None`
    /// when nothing is armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true exactly once per armed deadline, when it has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(DEFAULT_DELAY)
    }
}
