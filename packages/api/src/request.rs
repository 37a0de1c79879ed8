//! Stale-response detection by request identity.
//!
//! Each load takes a [`RequestTicket`] from its view's [`RequestTracker`].
//! Starting a newer load, or retiring the tracker when the view goes away,
//! makes older tickets stale so their responses are dropped instead of
//! overwriting fresher state.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    latest: Rc<Cell<u64>>,
    retired: Rc<Cell<bool>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; every earlier ticket becomes stale.
    pub fn begin(&self) -> RequestTicket {
        let generation = self.latest.get() + 1;
        self.latest.set(generation);
        RequestTicket {
            generation,
            tracker: self.clone(),
        }
    }

    /// Stale every outstanding ticket, e.g. when the owning view unmounts.
    pub fn retire(&self) {
        self.retired.set(true);
        self.latest.set(self.latest.get() + 1);
    }

    pub fn generation(&self) -> u64 {
        self.latest.get()
    }
}

#[derive(Clone, Debug)]
pub struct RequestTicket {
    generation: u64,
    tracker: RequestTracker,
}

impl RequestTicket {
    /// `true` while no newer request has started and the tracker is live.
    pub fn is_current(&self) -> bool {
        !self.tracker.retired.get() && self.tracker.latest.get() == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_wins() {
        let tracker = RequestTracker::new();
        let slow = tracker.begin();
        let fast = tracker.begin();
        assert!(!slow.is_current());
        assert!(fast.is_current());
    }

    #[test]
    fn test_retire_stales_everything() {
        let tracker = RequestTracker::new();
        let ticket = tracker.begin();
        tracker.retire();
        assert!(!ticket.is_current());
        assert!(!tracker.begin().is_current());
    }
}
