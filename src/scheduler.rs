use std::time::{Duration, Instant};

/// Identifies a single scheduled tick so it can be canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub(crate) u64);

struct Entry {
    handle: TickHandle,
    deadline: Instant,
}

/// One-shot delayed ticks for the event loop.
///
/// Nothing runs on its own: the event loop sleeps until
/// [`Scheduler::next_deadline`] and then collects whatever is due with
/// [`Scheduler::expired`].
pub struct Scheduler {
    next_id: u64,
    pending: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Schedule a tick to fire once `delay` has passed.
    ///
    /// # Arguments
    ///
    /// * `delay` - How long from now until the tick is due.
    pub fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        self.schedule_at(Instant::now() + delay)
    }

    /// Schedule a tick to fire at a fixed point in time.
    pub fn schedule_at(&mut self, deadline: Instant) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;

        self.pending.push(Entry { handle, deadline });
        handle
    }

    /// Cancel a pending tick.
    ///
    /// Returns false if the handle already fired or was never scheduled.
    pub fn cancel(&mut self, handle: TickHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.handle != handle);
        self.pending.len() != before
    }

    /// Remove and return every tick due at `now`, earliest first.
    pub fn expired(&mut self, now: Instant) -> Vec<TickHandle> {
        let (mut due, rest): (Vec<Entry>, Vec<Entry>) = self
            .pending
            .drain(..)
            .partition(|entry| entry.deadline <= now);
        self.pending = rest;

        due.sort_by_key(|entry| entry.deadline);
        due.into_iter().map(|entry| entry.handle).collect()
    }

    /// The earliest deadline still pending, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|entry| entry.deadline).min()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut scheduler = Scheduler::new();

        let a = scheduler.schedule_after(Duration::from_secs(1));
        let b = scheduler.schedule_after(Duration::from_secs(1));
        assert_ne!(a, b);
        assert_eq!(scheduler.len(), 2);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();

        let handle = scheduler.schedule_after(Duration::from_secs(1));
        assert!(scheduler.cancel(handle));
        assert!(scheduler.is_empty());

        // Already gone
        assert!(!scheduler.cancel(handle));
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn test_expired() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();

        let late = scheduler.schedule_at(start + Duration::from_secs(3));
        let early = scheduler.schedule_at(start + Duration::from_secs(1));
        let never = scheduler.schedule_at(start + Duration::from_secs(60));

        assert!(scheduler.expired(start).is_empty());
        assert_eq!(scheduler.next_deadline(), Some(start + Duration::from_secs(1)));

        let due = scheduler.expired(start + Duration::from_secs(5));
        assert_eq!(due, vec![early, late]);
        assert_eq!(scheduler.len(), 1);

        // Fired handles cannot be canceled anymore
        assert!(!scheduler.cancel(early));
        assert!(scheduler.cancel(never));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_deadline_is_inclusive() {
        let mut scheduler = Scheduler::new();
        let deadline = Instant::now() + Duration::from_millis(1000);

        let handle = scheduler.schedule_at(deadline);
        assert_eq!(scheduler.expired(deadline), vec![handle]);
    }
}
