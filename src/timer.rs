//! Cancellable one-shot deadlines driven by an injected clock.
//!
//! Every delayed behaviour in the dashboard (transition unmounts, the preview
//! debounce, the test-run auto-stop) is a [`Deadline`] polled from the event
//! loop. Re-arming replaces the pending due time, so a superseded timer can
//! never fire on top of newer state.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    due: Option<Instant>,
}

impl Deadline {
    pub const fn new() -> Self {
        Self { due: None }
    }

    /// Schedule the deadline `delay` after `now`, replacing any pending one.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// Returns `true` once when `now` has reached the due time, then disarms.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_never_fires() {
        let mut d = Deadline::new();
        assert!(!d.poll(Instant::now() + Duration::from_secs(3600)));
        assert!(d.remaining(Instant::now()).is_none());
    }

    #[test]
    fn fires_once_at_due_time() {
        let t0 = Instant::now();
        let mut d = Deadline::new();
        d.arm(t0, Duration::from_millis(300));
        assert!(!d.poll(t0 + Duration::from_millis(299)));
        assert!(d.poll(t0 + Duration::from_millis(300)));
        assert!(!d.poll(t0 + Duration::from_millis(400)));
        assert!(!d.is_armed());
    }

    #[test]
    fn rearm_replaces_pending_due_time() {
        let t0 = Instant::now();
        let mut d = Deadline::new();
        d.arm(t0, Duration::from_secs(30));
        d.arm(t0 + Duration::from_secs(10), Duration::from_secs(30));
        assert!(!d.poll(t0 + Duration::from_secs(30)));
        assert!(d.poll(t0 + Duration::from_secs(40)));
    }

    #[test]
    fn cancel_disarms() {
        let t0 = Instant::now();
        let mut d = Deadline::new();
        d.arm(t0, Duration::from_millis(10));
        d.cancel();
        assert!(!d.poll(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let t0 = Instant::now();
        let mut d = Deadline::new();
        d.arm(t0, Duration::from_secs(2));
        assert_eq!(d.remaining(t0), Some(Duration::from_secs(2)));
        assert_eq!(d.remaining(t0 + Duration::from_secs(5)), Some(Duration::ZERO));
    }
}
