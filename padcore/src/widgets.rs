//! Custom widgets: flat, outlined, drawn in the active palette

use crate::theme::Palette;
use egui::{Response, Ui, Widget};

/// Toolbar separator (vertical 1px line)
pub fn toolbar_separator(ui: &mut Ui, palette: Palette) {
    let height = ui.spacing().interact_size.y;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, height), egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        ui.painter().vline(
            rect.center().x,
            rect.y_range(),
            egui::Stroke::new(1.0, palette.ink),
        );
    }
}

/// Status bar: paper bg, 1px top border
pub fn status_bar(ui: &mut Ui, palette: Palette, text: &str) {
    egui::Frame::none()
        .fill(palette.paper)
        .stroke(egui::Stroke::new(1.0, palette.ink))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}

/// File list item for open/save dialogs.
pub struct FileListItem<'a> {
    name: &'a str,
    is_directory: bool,
    selected: bool,
    palette: Palette,
}

impl<'a> FileListItem<'a> {
    pub fn new(name: &'a str, is_directory: bool, palette: Palette) -> Self {
        Self { name, is_directory, selected: false, palette }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for FileListItem<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 20.0;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            egui::Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();

            // selected rows invert, hovered rows get the highlight
            let (fill, text_color) = if self.selected {
                (self.palette.ink, self.palette.paper)
            } else if response.hovered() {
                (self.palette.highlight, self.palette.ink)
            } else {
                (self.palette.paper, self.palette.ink)
            };
            painter.rect_filled(rect, 0.0, fill);

            let icon = if self.is_directory { "📁" } else { "📄" };
            let icon_rect = egui::Rect::from_min_size(
                rect.min + egui::vec2(4.0, 0.0),
                egui::vec2(16.0, height),
            );
            painter.text(
                icon_rect.center(),
                egui::Align2::CENTER_CENTER,
                icon,
                egui::FontId::proportional(12.0),
                text_color,
            );

            painter.text(
                egui::pos2(rect.min.x + 24.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.name,
                egui::FontId::proportional(12.0),
                text_color,
            );
        }

        response
    }
}
