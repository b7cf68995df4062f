//! TailPad theme
//!
//! One ink colour on one paper colour. Square corners, 1px outlines, no
//! shadows. The light palette is black on white; the dark palette is a soft
//! white on near-black.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Ink and paper colours for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub paper: Color32,
    pub ink: Color32,
    /// Background of selected text and hovered controls.
    pub highlight: Color32,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        paper: Color32::from_rgb(255, 255, 255),
        ink: Color32::from_rgb(0, 0, 0),
        highlight: Color32::from_rgb(160, 160, 160),
    };

    pub const DARK: Palette = Palette {
        paper: Color32::from_rgb(0x12, 0x12, 0x12),
        ink: Color32::from_rgb(0xee, 0xee, 0xee),
        highlight: Color32::from_rgb(0x55, 0x55, 0x55),
    };

    /// Whether text is lighter than its background.
    pub fn is_dark(&self) -> bool {
        luminance(self.paper) < luminance(self.ink)
    }
}

fn luminance(c: Color32) -> u32 {
    // integer Rec. 601 weights, good enough to order two colours
    299 * c.r() as u32 + 587 * c.g() as u32 + 114 * c.b() as u32
}

/// Theme configuration for TailPad windows
pub struct PadTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for PadTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 20.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 4.0,
        }
    }
}

impl PadTheme {
    /// Text styles used for chrome (menus, dialogs, status bar).
    /// The editor picks its own monospace size per frame.
    pub fn text_styles(&self) -> BTreeMap<TextStyle, FontId> {
        [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into()
    }

    /// Apply the theme in `palette` to an egui context
    pub fn apply(&self, ctx: &egui::Context, palette: Palette) {
        let mut style = Style::default();
        style.text_styles = self.text_styles();

        let mut visuals = if palette.is_dark() { Visuals::dark() } else { Visuals::light() };

        visuals.override_text_color = Some(palette.ink);
        visuals.window_fill = palette.paper;
        visuals.panel_fill = palette.paper;
        visuals.faint_bg_color = palette.paper;
        visuals.extreme_bg_color = palette.paper;

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, palette.ink);

        let flat = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::new(1.0, palette.ink);
            ws.fg_stroke = Stroke::new(1.0, palette.ink);
            ws.rounding = Rounding::ZERO;
        };
        flat(&mut visuals.widgets.noninteractive, palette.paper);
        flat(&mut visuals.widgets.inactive, palette.paper);
        flat(&mut visuals.widgets.hovered, palette.highlight);
        flat(&mut visuals.widgets.active, palette.highlight);
        flat(&mut visuals.widgets.open, palette.paper);

        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        visuals.selection.bg_fill = palette.highlight;
        visuals.selection.stroke = Stroke::new(1.0, palette.ink);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }

    /// Title bar: paper fill, 1px ink border
    pub fn title_bar_frame(palette: Palette) -> egui::Frame {
        egui::Frame::none()
            .fill(palette.paper)
            .stroke(Stroke::new(1.0, palette.ink))
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
    }
}

/// Menu bar styling helper
pub fn menu_bar<R>(
    ui: &mut egui::Ui,
    palette: Palette,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    let frame_resp = egui::Frame::none()
        .fill(palette.paper)
        .stroke(Stroke::new(1.0, palette.ink))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner);
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}
