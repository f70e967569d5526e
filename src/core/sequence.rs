//! Request sequencing for list fetches that can be superseded
//!
//! Each fetch is tagged with a [`FetchTicket`] when it is issued. When a
//! response arrives, it may replace the stored value only if its ticket is
//! still the most recently issued one. The displayed list therefore always
//! reflects the latest query rather than the latest reply to arrive, even
//! when the newer fetch fails or has not answered yet.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Sequence number tagging one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets
#[derive(Debug, Clone, Default)]
pub struct FetchSequencer {
    latest: Arc<AtomicU64>,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the ticket for a new fetch, superseding all earlier ones
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recently issued one
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// The most recently issued ticket, if any
    pub fn latest(&self) -> Option<FetchTicket> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            n => Some(FetchTicket(n)),
        }
    }
}

/// A value slot that only accepts results of the latest issued fetch
#[derive(Debug)]
pub struct LatestSlot<T> {
    inner: RwLock<(Option<FetchTicket>, Option<T>)>,
}

impl<T: Clone> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new((None, None)),
        }
    }

    /// Store `value` if `ticket` is still the latest one `sequencer` issued.
    ///
    /// Returns whether the value was accepted.
    pub fn offer(&self, sequencer: &FetchSequencer, ticket: FetchTicket, value: T) -> bool {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if !sequencer.is_current(ticket) || guard.0.is_some_and(|held| held > ticket) {
            tracing::debug!(
                ticket = ticket.value(),
                held = ?guard.0,
                "Discarding stale fetch result"
            );
            return false;
        }

        *guard = (Some(ticket), Some(value));
        true
    }

    /// Current value, if any result was accepted
    pub fn get(&self) -> Option<T> {
        match self.inner.read() {
            Ok(guard) => guard.1.clone(),
            Err(poisoned) => poisoned.into_inner().1.clone(),
        }
    }

    /// Ticket of the currently held value
    pub fn ticket(&self) -> Option<FetchTicket> {
        match self.inner.read() {
            Ok(guard) => guard.0,
            Err(poisoned) => poisoned.into_inner().0,
        }
    }
}

impl<T: Clone> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
