//! Cancellable fixed-delay timer shared by the suggestion and amendment
//! flows.
//!
//! The timer never spawns anything: callers pass the current [`Instant`]
//! into [`Debounce::schedule`] and poll [`Debounce::fire`] from their event
//! loop. Tests drive it with fabricated offsets from a single base instant,
//! so no real time has to pass.

use std::time::{Duration, Instant};

/// Default quiescence window for both debounced activities.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// A restartable single-shot delay.
///
/// Scheduling while a delay is pending replaces the old deadline, so a burst
/// of triggering events settles into at most one firing.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Start (or restart) the delay from `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline once it has passed.
    ///
    /// Returns `true` at most once per schedule; further polls stay `false`
    /// until the timer is scheduled again.
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

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}
