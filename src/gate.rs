//! One-shot gate carrying the connection outcome.
//!
//! The link supervision task settles the gate once; the main flow blocks on
//! it exactly once before opening the socket phase. Reading the gate clears
//! it, so a second wait without a new settle suspends indefinitely.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, with_timeout};

use crate::link::LinkOutcome;

/// Single-use rendezvous between the link supervision task and the main
/// flow.
pub struct ConnectionGate {
    signal: Signal<CriticalSectionRawMutex, LinkOutcome>,
}

impl ConnectionGate {
    /// Create an unsettled gate.
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Record a final outcome, waking the waiter if there is one. A later
    /// settle overwrites an unread one.
    pub fn settle(&self, outcome: LinkOutcome) {
        self.signal.signal(outcome);
    }

    /// Block until an outcome is available and take it (clear-on-read).
    pub async fn outcome(&self) -> LinkOutcome {
        self.signal.wait().await
    }

    /// Bounded variant of [`outcome`](Self::outcome); `None` on timeout.
    pub async fn outcome_with_timeout(&self, timeout: Duration) -> Option<LinkOutcome> {
        with_timeout(timeout, self.signal.wait()).await.ok()
    }

    /// Take the outcome if one is pending, without waiting.
    pub fn try_outcome(&self) -> Option<LinkOutcome> {
        self.signal.try_take()
    }
}

impl Default for ConnectionGate {
    fn default() -> Self {
        Self::new()
    }
}
