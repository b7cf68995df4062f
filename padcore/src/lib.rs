//! padcore: shared desktop support for TailPad

pub mod logging;
pub mod repaint;
pub mod storage;
pub mod theme;
pub mod widgets;

pub use repaint::RepaintController;
pub use theme::{Palette, PadTheme};
