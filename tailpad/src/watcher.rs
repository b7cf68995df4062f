//! Polling watcher for the bound file
//!
//! While running, every `interval` the watcher re-reads the bound file and
//! replaces the buffer if the text on disk differs. A missing file is skipped
//! quietly (log rotation rewrites files in place) and a failed read is
//! reported but never stops the timer. Only [`FileWatcher::stop`] does that.

use crate::document::{read_text, DocumentState};
use crate::error::{Result, TailError};
use crate::scheduler::{IntervalScheduler, Scheduler, TimerHandle};
use std::io::ErrorKind;
use std::time::{Duration, Instant};

/// Poll period used by the window; not configurable.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Watching is off or no file is bound.
    Skipped,
    /// The bound file does not exist right now.
    Missing,
    /// Disk matches the buffer.
    Unchanged,
    /// The buffer was replaced with the text on disk.
    Refreshed,
    /// Reading the file failed; see the accompanying warning.
    ReadFailed,
}

pub struct FileWatcher<S: Scheduler = IntervalScheduler> {
    enabled: bool,
    interval: Duration,
    scheduler: S,
    timer: Option<TimerHandle>,
}

impl Default for FileWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FileWatcher {
    pub fn new() -> Self {
        Self::with_scheduler(IntervalScheduler::new())
    }
}

impl<S: Scheduler> FileWatcher<S> {
    /// Disabled, stopped watcher using the default interval.
    pub fn with_scheduler(scheduler: S) -> Self {
        Self {
            enabled: false,
            interval: DEFAULT_POLL_INTERVAL,
            scheduler,
            timer: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the user's intent. Does not start or stop the timer.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Arm the timer. Restarting a running watcher resets its period.
    pub fn start(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle);
        }
        self.timer = Some(self.scheduler.schedule(self.interval));
        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "watcher timer armed");
    }

    /// Disarm the timer. No-op when already stopped.
    pub fn stop(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle);
            tracing::debug!("watcher timer disarmed");
        }
    }

    /// Whether the timer fell due at `now`. Re-arms it if so.
    pub fn due(&mut self, now: Instant) -> bool {
        let Some(handle) = self.timer else {
            return false;
        };
        self.scheduler.poll_due(now).contains(&handle)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.and_then(|_| self.scheduler.next_deadline())
    }

    /// Re-read the bound file and reconcile it with the buffer.
    ///
    /// Checks its preconditions itself: the timer may fire right after the
    /// user switched watching off.
    pub fn tick(&self, doc: &mut DocumentState) -> Result<TickOutcome> {
        if !self.enabled {
            return Ok(TickOutcome::Skipped);
        }
        let Some(path) = doc.path().map(|p| p.to_path_buf()) else {
            return Ok(TickOutcome::Skipped);
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "watched file missing, skipping tick");
            return Ok(TickOutcome::Missing);
        }

        let text = match read_text(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // removed between the existence check and the read
                return Ok(TickOutcome::Missing);
            }
            Err(source) => return Err(TailError::WatchRead { path, source }),
        };

        if doc.is_diverged(&text) {
            tracing::debug!(path = %path.display(), bytes = text.len(), "watched file changed");
            doc.refresh(text);
            Ok(TickOutcome::Refreshed)
        } else {
            Ok(TickOutcome::Unchanged)
        }
    }
}
