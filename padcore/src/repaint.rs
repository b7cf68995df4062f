//! Repaint scheduling for TailPad windows
//!
//! egui only runs `update()` when something asks for a frame. Input events
//! wake it up on their own, but a polling timer does not: if the window sits
//! idle, nothing would ever run the timer's work.
//!
//! `RepaintController` collects what the next frame is waiting on during
//! `update()` and turns it into a single request at the end:
//!
//! 1. **State change**: something changed outside of input handling.
//!    Repaint immediately.
//! 2. **Wake-up**: a timer has a deadline. Repaint when it falls due.
//! 3. **Idle**: nothing pending. Do *not* repaint.

use std::time::{Duration, Instant};

/// Controls when the egui context should request repaints.
///
/// Drop this into your app struct and call [`RepaintController::begin_frame`]
/// at the top of `update()` and [`RepaintController::end_frame`] at the bottom.
#[derive(Debug, Default)]
pub struct RepaintController {
    /// Whether a one-shot repaint has been requested.
    needs_repaint: bool,
    /// Earliest deadline registered this frame.
    wake_at: Option<Instant>,
}

impl RepaintController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a single repaint on the next opportunity.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Ask for a frame no later than `deadline`.
    ///
    /// Deadlines are not remembered across frames: register the pending one
    /// every frame. When several are registered the earliest wins.
    pub fn wake_at(&mut self, deadline: Instant) {
        self.wake_at = Some(match self.wake_at {
            Some(current) => current.min(deadline),
            None => deadline,
        });
    }

    /// How long egui may sleep after this frame, or `None` to sleep until input.
    pub fn next_delay(&self, now: Instant) -> Option<Duration> {
        if self.needs_repaint {
            return Some(Duration::ZERO);
        }
        self.wake_at.map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Call at the **start** of your `update()` method.
    pub fn begin_frame(&mut self) {
        self.needs_repaint = false;
    }

    /// Call at the **end** of your `update()` method.
    pub fn end_frame(&mut self, ctx: &egui::Context) {
        match self.next_delay(Instant::now()) {
            Some(delay) if delay.is_zero() => ctx.request_repaint(),
            Some(delay) => ctx.request_repaint_after(delay),
            None => {}
        }
        self.wake_at = None;
    }
}
