//! Font size and light/dark mode

/// Family name the window maps to its monospace font.
pub const FONT_FAMILY: &str = "monospace";
pub const DEFAULT_FONT_SIZE: u32 = 12;
/// Smallest size `decrease` will reach.
pub const MIN_FONT_SIZE: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontState {
    size: u32,
}

impl Default for FontState {
    fn default() -> Self {
        Self { size: DEFAULT_FONT_SIZE }
    }
}

impl FontState {
    pub fn family(&self) -> &'static str {
        FONT_FAMILY
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn increase(&mut self) {
        self.size = self.size.saturating_add(1);
    }

    /// Shrink by one point unless already at the floor.
    pub fn decrease(&mut self) {
        if self.size > MIN_FONT_SIZE {
            self.size -= 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Toolbar button label showing the current mode.
    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "🌞 Light",
            ThemeMode::Dark => "🌙 Dark",
        }
    }
}
