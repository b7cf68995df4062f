//! Interval timers for a single-threaded UI loop
//!
//! There are no callbacks and no threads. The loop asks which timers are due
//! and runs their work itself, so timer work never overlaps user actions.

use std::time::{Duration, Instant};

/// Identifies one scheduled timer. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A cancellable periodic scheduler.
pub trait Scheduler {
    /// Start a timer that falls due every `interval`, first one `interval` from now.
    fn schedule(&mut self, interval: Duration) -> TimerHandle;

    /// Stop a timer. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Timers whose deadline is at or before `now`. Each is re-armed one
    /// interval after `now`, so a loop that stalled for several periods sees
    /// a single firing.
    fn poll_due(&mut self, now: Instant) -> Vec<TimerHandle>;

    /// Earliest pending deadline, if any timer is armed.
    fn next_deadline(&self) -> Option<Instant>;
}

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    interval: Duration,
    deadline: Instant,
}

/// `Instant`-based scheduler polled from the UI loop.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    next_id: u64,
    timers: Vec<Timer>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.timers.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn schedule_from(&mut self, interval: Duration, now: Instant) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            handle,
            interval,
            deadline: now + interval,
        });
        handle
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule(&mut self, interval: Duration) -> TimerHandle {
        self.schedule_from(interval, Instant::now())
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }

    fn poll_due(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut due = Vec::new();
        for timer in &mut self.timers {
            if timer.deadline <= now {
                timer.deadline = now + timer.interval;
                due.push(timer.handle);
            }
        }
        due
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.deadline).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_not_due_before_interval() {
        let start = Instant::now();
        let mut s = IntervalScheduler::new();
        let h = s.schedule_from(5 * SEC, start);
        assert!(s.poll_due(start + 4 * SEC).is_empty());
        assert_eq!(s.poll_due(start + 5 * SEC), vec![h]);
    }

    #[test]
    fn test_rearms_after_firing() {
        let start = Instant::now();
        let mut s = IntervalScheduler::new();
        let h = s.schedule_from(5 * SEC, start);
        assert_eq!(s.poll_due(start + 6 * SEC), vec![h]);
        assert_eq!(s.next_deadline(), Some(start + 11 * SEC));
        assert!(s.poll_due(start + 10 * SEC).is_empty());
        assert_eq!(s.poll_due(start + 11 * SEC), vec![h]);
    }

    #[test]
    fn test_missed_periods_coalesce() {
        let start = Instant::now();
        let mut s = IntervalScheduler::new();
        let h = s.schedule_from(SEC, start);
        assert_eq!(s.poll_due(start + 30 * SEC), vec![h]);
        assert!(s.poll_due(start + 30 * SEC).is_empty());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let start = Instant::now();
        let mut s = IntervalScheduler::new();
        let h = s.schedule_from(SEC, start);
        s.cancel(h);
        s.cancel(h);
        assert!(s.is_empty());
        assert!(s.poll_due(start + 2 * SEC).is_empty());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_handles_are_distinct() {
        let mut s = IntervalScheduler::new();
        let a = s.schedule(SEC);
        s.cancel(a);
        let b = s.schedule(SEC);
        assert_ne!(a, b);
        assert!(!s.is_scheduled(a));
        assert!(s.is_scheduled(b));
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let start = Instant::now();
        let mut s = IntervalScheduler::new();
        s.schedule_from(5 * SEC, start);
        s.schedule_from(2 * SEC, start);
        assert_eq!(s.len(), 2);
        assert_eq!(s.next_deadline(), Some(start + 2 * SEC));
    }
}
