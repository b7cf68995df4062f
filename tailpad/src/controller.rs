//! Operations the window calls into
//!
//! `EditorController` owns the document, the watcher and the view settings.
//! Open and save failures come back from the call that caused them. Watcher
//! results arrive later, from a poll, so they are queued as [`Signal`]s for
//! the window to pick up with [`EditorController::take_signals`].
//!
//! Watching needs both the user's switch and a bound file at the moment the
//! switch is flipped. Binding a file afterwards does not start the timer;
//! flip the switch again.

use crate::appearance::{FontState, ThemeMode};
use crate::document::{read_text, write_text, DocumentState};
use crate::error::{Result, TailError};
use crate::scheduler::{IntervalScheduler, Scheduler};
use crate::watcher::{FileWatcher, TickOutcome};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Something the window should react to after an operation or a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The buffer was replaced; copy it into the text widget.
    ContentReplaced,
    /// Move the cursor to the end and scroll it into view.
    ScrollToBottom,
    /// Non-blocking notice, e.g. a failed poll.
    Warning { title: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// No file is bound; ask the user for one and call `save_as`.
    NeedsPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// No file bound.
    Idle,
    /// File bound, timer not running.
    BoundInactive,
    /// File bound, timer running.
    BoundActive,
}

pub struct EditorController<S: Scheduler = IntervalScheduler> {
    document: DocumentState,
    watcher: FileWatcher<S>,
    font: FontState,
    theme: ThemeMode,
    signals: Vec<Signal>,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorController {
    pub fn new() -> Self {
        Self::with_scheduler(IntervalScheduler::new())
    }
}

impl<S: Scheduler> EditorController<S> {
    pub fn with_scheduler(scheduler: S) -> Self {
        Self {
            document: DocumentState::new(),
            watcher: FileWatcher::with_scheduler(scheduler),
            font: FontState::default(),
            theme: ThemeMode::default(),
            signals: Vec::new(),
        }
    }

    pub fn document(&self) -> &DocumentState {
        &self.document
    }

    pub fn font(&self) -> FontState {
        self.font
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn watcher(&self) -> &FileWatcher<S> {
        &self.watcher
    }

    pub fn watch_state(&self) -> WatchState {
        match (self.document.is_bound(), self.watcher.is_running()) {
            (false, _) => WatchState::Idle,
            (true, false) => WatchState::BoundInactive,
            (true, true) => WatchState::BoundActive,
        }
    }

    /// Bind to `path` and load it. On failure nothing changes.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = read_text(&path).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "open failed");
            TailError::Open { path: path.clone(), source }
        })?;

        tracing::info!(path = %path.display(), bytes = content.len(), "file opened");
        self.document.bind(path, content);
        self.signals.push(Signal::ContentReplaced);
        self.signals.push(Signal::ScrollToBottom);
        Ok(())
    }

    /// Same as [`EditorController::select_file`].
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.select_file(path)
    }

    /// Write the buffer to the bound file, or report that a path is needed.
    pub fn save(&mut self) -> Result<SaveOutcome> {
        let Some(path) = self.document.path().map(Path::to_path_buf) else {
            return Ok(SaveOutcome::NeedsPath);
        };
        self.write_to(&path)?;
        Ok(SaveOutcome::Saved(path))
    }

    /// Bind to `path` and write the buffer to it. The binding stays even if
    /// the write fails, so a later `save` retries the same file.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.document.set_path(path.clone());
        self.write_to(&path)
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        write_text(path, self.document.content()).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "save failed");
            TailError::Save { path: path.to_path_buf(), source }
        })?;
        tracing::info!(path = %path.display(), bytes = self.document.content().len(), "file saved");
        self.document.mark_synced();
        Ok(())
    }

    /// Live edit read back from the text widget.
    pub fn set_content(&mut self, content: String) {
        self.document.set_content(content);
    }

    pub fn toggle_watcher(&mut self, enabled: bool) {
        self.watcher.set_enabled(enabled);
        if enabled && self.document.is_bound() {
            self.watcher.start();
            tracing::info!(
                path = %self.document.path().map(|p| p.display().to_string()).unwrap_or_default(),
                interval_ms = self.watcher.interval().as_millis() as u64,
                "watching started"
            );
        } else {
            if self.watcher.is_running() {
                tracing::info!("watching stopped");
            }
            self.watcher.stop();
        }
    }

    /// Run the watcher once against whatever path is bound now.
    pub fn tick(&mut self) -> TickOutcome {
        match self.watcher.tick(&mut self.document) {
            Ok(TickOutcome::Refreshed) => {
                self.signals.push(Signal::ContentReplaced);
                self.signals.push(Signal::ScrollToBottom);
                TickOutcome::Refreshed
            }
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(path = %e.path().display(), error = %e, "watcher read failed");
                self.signals.push(Signal::Warning {
                    title: e.title().to_string(),
                    message: e.to_string(),
                });
                TickOutcome::ReadFailed
            }
        }
    }

    /// Tick if the watcher's timer is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<TickOutcome> {
        if self.watcher.due(now) {
            Some(self.tick())
        } else {
            None
        }
    }

    /// When the window should next call [`EditorController::poll`].
    pub fn next_wake(&self) -> Option<Instant> {
        self.watcher.next_deadline()
    }

    pub fn increase_font(&mut self) {
        self.font.increase();
    }

    pub fn decrease_font(&mut self) {
        self.font.decrease();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::tempdir;

    fn scrolls(signals: &[Signal]) -> usize {
        signals.iter().filter(|s| **s == Signal::ScrollToBottom).count()
    }

    #[test]
    fn test_starts_idle() {
        let c = EditorController::new();
        assert_eq!(c.watch_state(), WatchState::Idle);
        assert_eq!(c.document().content(), "");
        assert_eq!(c.font().size(), 12);
        assert_eq!(c.theme(), ThemeMode::Light);
        assert!(!c.watcher().is_enabled());
    }

    #[test]
    fn test_select_file_loads_and_scrolls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "a\nb\n").unwrap();

        let mut c = EditorController::new();
        c.select_file(&path).unwrap();
        assert_eq!(c.document().path(), Some(path.as_path()));
        assert_eq!(c.document().content(), "a\nb\n");
        assert_eq!(c.watch_state(), WatchState::BoundInactive);
        assert_eq!(c.take_signals(), vec![Signal::ContentReplaced, Signal::ScrollToBottom]);
        assert!(c.take_signals().is_empty());
    }

    #[test]
    fn test_select_missing_file_leaves_state() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, "keep").unwrap();

        let mut c = EditorController::new();
        c.open(&good).unwrap();
        c.take_signals();

        let err = c.select_file(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, TailError::Open { .. }));
        assert!(err.to_string().starts_with("Could not open file:\n"));
        assert_eq!(c.document().path(), Some(good.as_path()));
        assert_eq!(c.document().content(), "keep");
        assert!(c.take_signals().is_empty());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let text = "first\n\nüñí\tcode\r\nlast";

        let mut c = EditorController::new();
        c.set_content(text.to_string());
        c.save_as(&path).unwrap();
        assert!(!c.document().is_dirty());

        let mut other = EditorController::new();
        other.select_file(&path).unwrap();
        assert_eq!(other.document().content(), text);
    }

    #[test]
    fn test_save_without_path_needs_path() {
        let mut c = EditorController::new();
        c.set_content("draft".to_string());
        assert_eq!(c.save().unwrap(), SaveOutcome::NeedsPath);
        assert!(c.document().is_dirty());
    }

    #[test]
    fn test_save_writes_bound_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "old").unwrap();

        let mut c = EditorController::new();
        c.select_file(&path).unwrap();
        c.set_content("new".to_string());
        assert_eq!(c.save().unwrap(), SaveOutcome::Saved(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_save_as_failure_binds_new_path_and_keeps_buffer() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, "text").unwrap();

        let mut c = EditorController::new();
        c.select_file(&good).unwrap();
        c.set_content("edited".to_string());

        let bad = dir.path().join("missing-dir").join("out.txt");
        let err = c.save_as(&bad).unwrap_err();
        assert!(matches!(err, TailError::Save { .. }));
        assert_eq!(err.title(), "Error");
        assert_eq!(c.document().path(), Some(bad.as_path()));
        assert_eq!(c.document().content(), "edited");
        assert!(c.document().is_dirty());
        assert_eq!(fs::read_to_string(&good).unwrap(), "text");
    }

    #[test]
    fn test_save_retries_path_from_failed_save_as() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("later").join("out.txt");

        let mut c = EditorController::new();
        c.set_content("draft".to_string());
        assert!(c.save_as(&target).is_err());
        assert_eq!(c.document().path(), Some(target.as_path()));
        assert!(c.document().is_dirty());

        fs::create_dir(dir.path().join("later")).unwrap();
        assert_eq!(c.save().unwrap(), SaveOutcome::Saved(target.clone()));
        assert_eq!(fs::read_to_string(&target).unwrap(), "draft");
        assert!(!c.document().is_dirty());
    }

    #[test]
    fn test_toggle_watcher_without_path_does_not_start() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "a\n").unwrap();

        let mut c = EditorController::new();
        c.toggle_watcher(true);
        assert!(c.watcher().is_enabled());
        assert!(!c.watcher().is_running());
        assert_eq!(c.watch_state(), WatchState::Idle);

        // binding afterwards does not start it either
        c.select_file(&path).unwrap();
        assert_eq!(c.watch_state(), WatchState::BoundInactive);
        assert_eq!(c.next_wake(), None);

        c.toggle_watcher(true);
        assert_eq!(c.watch_state(), WatchState::BoundActive);
    }

    #[test]
    fn test_toggle_watcher_transitions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "a\n").unwrap();

        let mut c = EditorController::new();
        c.select_file(&path).unwrap();
        c.toggle_watcher(true);
        assert_eq!(c.watch_state(), WatchState::BoundActive);
        assert!(c.next_wake().is_some());

        c.toggle_watcher(false);
        assert_eq!(c.watch_state(), WatchState::BoundInactive);
        assert_eq!(c.next_wake(), None);
        c.toggle_watcher(false);
        assert_eq!(c.watch_state(), WatchState::BoundInactive);
    }

    #[test]
    fn test_tail_appended_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "a\nb\n").unwrap();

        let mut c = EditorController::new();
        c.select_file(&path).unwrap();
        c.toggle_watcher(true);
        c.take_signals();

        let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"c\n").unwrap();
        drop(file);

        assert_eq!(c.poll(Instant::now() + Duration::from_secs(6)), Some(TickOutcome::Refreshed));
        assert_eq!(c.document().content(), "a\nb\nc\n");
        let signals = c.take_signals();
        assert_eq!(signals, vec![Signal::ContentReplaced, Signal::ScrollToBottom]);
        assert_eq!(scrolls(&signals), 1);
    }

    #[test]
    fn test_poll_before_due_does_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "a\n").unwrap();

        let mut c = EditorController::new();
        c.select_file(&path).unwrap();
        c.toggle_watcher(true);
        fs::write(&path, "changed\n").unwrap();

        assert_eq!(c.poll(Instant::now()), None);
        assert_eq!(c.document().content(), "a\n");
    }

    #[test]
    fn test_tick_identical_content_is_silent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "same\n").unwrap();

        let mut c = EditorController::new();
        c.select_file(&path).unwrap();
        c.toggle_watcher(true);
        c.take_signals();

        assert_eq!(c.tick(), TickOutcome::Unchanged);
        assert_eq!(c.document().content(), "same\n");
        assert!(c.take_signals().is_empty());
    }

    #[test]
    fn test_tick_deleted_file_keeps_running() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "a\n").unwrap();

        let mut c = EditorController::new();
        c.select_file(&path).unwrap();
        c.toggle_watcher(true);
        c.take_signals();
        fs::remove_file(&path).unwrap();

        assert_eq!(c.poll(Instant::now() + Duration::from_secs(6)), Some(TickOutcome::Missing));
        assert_eq!(c.document().content(), "a\n");
        assert!(c.take_signals().is_empty());
        assert_eq!(c.watch_state(), WatchState::BoundActive);
    }

    #[test]
    fn test_tick_read_failure_warns_and_keeps_running() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "a\n").unwrap();

        let mut c = EditorController::new();
        c.select_file(&path).unwrap();
        c.toggle_watcher(true);
        c.take_signals();

        // the bound path turns into something that cannot be read as text
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert_eq!(c.tick(), TickOutcome::ReadFailed);
        let signals = c.take_signals();
        assert_eq!(signals.len(), 1);
        assert!(matches!(&signals[0], Signal::Warning { title, .. } if title == "Watcher Error"));
        assert_eq!(c.watch_state(), WatchState::BoundActive);
        assert_eq!(c.document().content(), "a\n");
    }

    #[test]
    fn test_rebind_while_active_follows_new_path() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");
        fs::write(&first, "one\n").unwrap();
        fs::write(&second, "two\n").unwrap();

        let mut c = EditorController::new();
        c.select_file(&first).unwrap();
        c.toggle_watcher(true);
        c.select_file(&second).unwrap();
        assert_eq!(c.watch_state(), WatchState::BoundActive);

        fs::write(&second, "two\nthree\n").unwrap();
        assert_eq!(c.tick(), TickOutcome::Refreshed);
        assert_eq!(c.document().content(), "two\nthree\n");
    }

    #[test]
    fn test_tick_after_disable_is_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "a\n").unwrap();

        let mut c = EditorController::new();
        c.select_file(&path).unwrap();
        c.toggle_watcher(true);
        c.toggle_watcher(false);
        fs::write(&path, "b\n").unwrap();

        assert_eq!(c.tick(), TickOutcome::Skipped);
        assert_eq!(c.document().content(), "a\n");
    }

    #[test]
    fn test_font_and_theme() {
        let mut c = EditorController::new();
        c.increase_font();
        assert_eq!(c.font().size(), 13);
        for _ in 0..20 {
            c.decrease_font();
        }
        assert_eq!(c.font().size(), 6);

        c.toggle_theme();
        assert_eq!(c.theme(), ThemeMode::Dark);
        c.toggle_theme();
        assert_eq!(c.theme(), ThemeMode::Light);
    }
}
