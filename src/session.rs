//! Last-committed-query-wins coordination for interactive searching.
//!
//! Each committed query takes a [`Ticket`]. Only the newest ticket is
//! current; a response that arrives for an older ticket is dropped, whatever
//! order the responses come back in. In-flight requests are not cancelled.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Identifies one committed query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Hands out tickets and filters stale responses
#[derive(Debug)]
pub struct SearchSession {
    generation: AtomicU64,
    debounce: Duration,
}

impl SearchSession {
    /// Create a session with the given debounce delay
    pub fn new(debounce: Duration) -> Self {
        Self {
            generation: AtomicU64::new(0),
            debounce,
        }
    }

    /// Commit a new query, superseding every earlier ticket
    pub fn commit(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the most recent commit
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Pass `value` through only if `ticket` is still current
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(ticket = ticket.0, "dropping superseded search response");
            None
        }
    }

    /// Wait out the debounce delay; false if a newer commit arrived meanwhile
    pub async fn debounce(&self, ticket: Ticket) -> bool {
        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        self.is_current(ticket)
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(Duration::from_millis(400))
    }
}
