//! Latest-wins guard for revalidation
//!
//! A host that re-runs the username check on every keystroke issues a
//! ticket per run. Only the result carrying the newest ticket is accepted,
//! so a slow lookup for an old value cannot overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Issues tickets and accepts only the newest
#[derive(Debug, Default)]
pub struct SupersedeGuard {
    latest: AtomicU64,
}

impl SupersedeGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run, superseding every earlier ticket
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer run has been started since `ticket`
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Keep `value` only if `ticket` is still the newest
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}
