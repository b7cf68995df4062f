//! TailPad - a minimal text viewer with a tail mode
//!
//! The library is the part of TailPad that has state worth testing:
//! - `document`: the bound file and its in-memory text
//! - `scheduler`: interval timers driven by the UI loop
//! - `watcher`: polling re-read of the bound file
//! - `controller`: the operations the window calls into
//!
//! The `tailpad` binary wraps this in an egui window.

pub mod appearance;
pub mod controller;
pub mod document;
pub mod error;
pub mod scheduler;
pub mod watcher;

pub use appearance::{FontState, ThemeMode};
pub use controller::{EditorController, SaveOutcome, Signal, WatchState};
pub use document::DocumentState;
pub use error::{Result, TailError};
pub use scheduler::{IntervalScheduler, Scheduler, TimerHandle};
pub use watcher::{FileWatcher, TickOutcome, DEFAULT_POLL_INTERVAL};
