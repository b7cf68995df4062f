//! TailPad window
//!
//! Menus, toolbar and dialogs. Every action goes through `EditorController`;
//! this file only keeps what egui needs between frames (the text widget's
//! buffer, which dialogs are open) and reacts to the controller's signals.

use egui::{Align2, Context, Key};
use padcore::repaint::RepaintController;
use padcore::storage::{documents_dir, FileBrowser, FileFilter};
use padcore::theme::{menu_bar, PadTheme, Palette};
use padcore::widgets::{status_bar, toolbar_separator, FileListItem};
use std::path::PathBuf;
use std::time::Instant;
use tailpad::{EditorController, SaveOutcome, Signal, TailError, ThemeMode, WatchState};

#[derive(Clone, Copy, PartialEq)]
enum FileBrowserMode {
    Open,
    Save,
}

/// A message shown in its own window until dismissed.
struct Notice {
    title: String,
    message: String,
}

fn palette_for(mode: ThemeMode) -> Palette {
    match mode {
        ThemeMode::Light => Palette::LIGHT,
        ThemeMode::Dark => Palette::DARK,
    }
}

pub struct TailPadApp {
    controller: EditorController,
    /// What the text widget edits. Replaced when the controller reloads the
    /// document, copied back into it on every edit.
    buffer: String,
    scroll_to_bottom: bool,
    theme: PadTheme,
    applied_theme: Option<ThemeMode>,
    show_file_browser: bool,
    file_browser: FileBrowser,
    file_browser_mode: FileBrowserMode,
    save_filename: String,
    /// Open/save failure; blocks the window until acknowledged.
    error: Option<Notice>,
    /// Watcher failure; shown without blocking, polling continues.
    warning: Option<Notice>,
    show_about: bool,
    show_shortcuts: bool,
    repaint: RepaintController,
}

impl TailPadApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_context(&cc.egui_ctx)
    }

    fn with_context(ctx: &Context) -> Self {
        let controller = EditorController::new();
        let theme = PadTheme::default();
        theme.apply(ctx, palette_for(controller.theme()));
        let applied_theme = Some(controller.theme());

        Self {
            controller,
            buffer: String::new(),
            scroll_to_bottom: false,
            theme,
            applied_theme,
            show_file_browser: false,
            file_browser: FileBrowser::new(documents_dir()),
            file_browser_mode: FileBrowserMode::Open,
            save_filename: String::new(),
            error: None,
            warning: None,
            show_about: false,
            show_shortcuts: false,
            repaint: RepaintController::new(),
        }
    }

    fn palette(&self) -> Palette {
        palette_for(self.controller.theme())
    }

    fn report(&mut self, error: TailError) {
        self.error = Some(Notice {
            title: error.title().to_string(),
            message: error.to_string(),
        });
        self.repaint.mark_needs_repaint();
    }

    fn select_file(&mut self, path: PathBuf) {
        if let Err(e) = self.controller.select_file(path) {
            self.report(e);
        }
    }

    fn save_document(&mut self) {
        match self.controller.save() {
            Ok(SaveOutcome::Saved(_)) => {}
            Ok(SaveOutcome::NeedsPath) => self.show_save_as_dialog(),
            Err(e) => self.report(e),
        }
    }

    fn save_document_as(&mut self, path: PathBuf) {
        if let Err(e) = self.controller.save_as(path) {
            self.report(e);
        }
    }

    /// Directory the dialogs start in: next to the bound file if there is one.
    fn browse_dir(&self) -> PathBuf {
        self.controller
            .document()
            .path()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(documents_dir)
    }

    fn show_open_dialog(&mut self) {
        let filter = self.file_browser.filter;
        self.file_browser = FileBrowser::new(self.browse_dir()).with_filter(filter);
        self.file_browser_mode = FileBrowserMode::Open;
        self.show_file_browser = true;
    }

    fn show_save_as_dialog(&mut self) {
        let filter = self.file_browser.filter;
        self.file_browser = FileBrowser::new(self.browse_dir()).with_filter(filter);
        self.file_browser_mode = FileBrowserMode::Save;
        self.save_filename = self.controller.document().title();
        if !self.save_filename.contains('.') {
            self.save_filename.push_str(".txt");
        }
        self.show_file_browser = true;
    }

    fn display_title(&self) -> String {
        let doc = self.controller.document();
        if doc.is_dirty() {
            format!("{}*", doc.title())
        } else {
            doc.title()
        }
    }

    fn status_text(&self) -> String {
        let doc = self.controller.document();
        let location = doc
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "no file".to_string());
        let watching = match self.controller.watch_state() {
            WatchState::BoundActive => format!(
                "watching every {}s",
                self.controller.watcher().interval().as_secs()
            ),
            _ if self.controller.watcher().is_enabled() => "watcher paused".to_string(),
            _ => "watcher off".to_string(),
        };
        format!("{}  |  {} lines  |  {}", location, doc.line_count(), watching)
    }

    fn apply_theme(&mut self, ctx: &Context) {
        let mode = self.controller.theme();
        if self.applied_theme != Some(mode) {
            self.theme.apply(ctx, palette_for(mode));
            self.applied_theme = Some(mode);
            tracing::debug!(?mode, "theme applied");
        }
    }

    fn process_signals(&mut self) {
        for signal in self.controller.take_signals() {
            match signal {
                Signal::ContentReplaced => {
                    self.buffer = self.controller.document().content().to_string();
                }
                Signal::ScrollToBottom => self.scroll_to_bottom = true,
                Signal::Warning { title, message } => {
                    self.warning = Some(Notice { title, message });
                }
            }
            self.repaint.mark_needs_repaint();
        }
    }

    /// Cmd shortcuts are taken out of the event stream before the text
    /// widget sees them; everything else is left for the widget.
    fn handle_keyboard(&mut self, ctx: &Context) {
        let mut actions: Vec<Box<dyn FnOnce(&mut Self)>> = Vec::new();

        ctx.input_mut(|i| {
            let cmd = i.modifiers.command;
            let shift = i.modifiers.shift;

            let events = std::mem::take(&mut i.events);
            let mut remaining = Vec::new();

            for event in events {
                let mut handled = false;
                if let egui::Event::Key { key, pressed: true, .. } = &event {
                    match key {
                        Key::O if cmd => { handled = true; actions.push(Box::new(|s| s.show_open_dialog())); }
                        Key::S if cmd && shift => { handled = true; actions.push(Box::new(|s| s.show_save_as_dialog())); }
                        Key::S if cmd => { handled = true; actions.push(Box::new(|s| s.save_document())); }
                        Key::Plus | Key::Equals if cmd => { handled = true; actions.push(Box::new(|s| s.controller.increase_font())); }
                        Key::Minus if cmd => { handled = true; actions.push(Box::new(|s| s.controller.decrease_font())); }
                        _ => {}
                    }
                }
                if !handled {
                    remaining.push(event);
                }
            }
            i.events = remaining;
        });

        for action in actions {
            action(self);
        }
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette();
        menu_bar(ui, palette, |ui| {
            ui.menu_button("file", |ui| {
                if ui.button("open...        \u{2318}o").clicked() {
                    self.show_open_dialog();
                    ui.close_menu();
                }
                if ui.button("select file...").clicked() {
                    self.show_open_dialog();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("save           \u{2318}s").clicked() {
                    self.save_document();
                    ui.close_menu();
                }
                if ui.button("save as...    \u{21e7}\u{2318}s").clicked() {
                    self.show_save_as_dialog();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("exit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close_menu();
                }
            });

            ui.menu_button("view", |ui| {
                if ui.button("larger font    \u{2318}=").clicked() {
                    self.controller.increase_font();
                    ui.close_menu();
                }
                if ui.button("smaller font   \u{2318}-").clicked() {
                    self.controller.decrease_font();
                    ui.close_menu();
                }
                ui.separator();
                let label = match self.controller.theme() {
                    ThemeMode::Light => "dark theme",
                    ThemeMode::Dark => "light theme",
                };
                if ui.button(label).clicked() {
                    self.controller.toggle_theme();
                    ui.close_menu();
                }
            });

            ui.menu_button("help", |ui| {
                if ui.button("keyboard shortcuts").clicked() {
                    self.show_shortcuts = true;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("about").clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });
        });
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette();
        ui.horizontal(|ui| {
            if ui.button("select file").clicked() {
                self.show_open_dialog();
            }

            let mut enabled = self.controller.watcher().is_enabled();
            if ui.checkbox(&mut enabled, "watcher").changed() {
                self.controller.toggle_watcher(enabled);
            }

            toolbar_separator(ui, palette);
            ui.label("font:");
            if ui.button("\u{2013}").clicked() {
                self.controller.decrease_font();
            }
            if ui.button("+").clicked() {
                self.controller.increase_font();
            }
            ui.label(format!("{}pt", self.controller.font().size()));

            toolbar_separator(ui, palette);
            if ui.button(self.controller.theme().label()).clicked() {
                self.controller.toggle_theme();
            }
        });
    }

    fn render_editor(&mut self, ui: &mut egui::Ui) {
        let font = egui::FontId::monospace(self.controller.font().size() as f32);
        let scroll_to_bottom = std::mem::take(&mut self.scroll_to_bottom);

        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let output = egui::TextEdit::multiline(&mut self.buffer)
                    .font(font)
                    .desired_width(f32::INFINITY)
                    .desired_rows(24)
                    .frame(false)
                    .show(ui);

                if output.response.changed() {
                    self.controller.set_content(self.buffer.clone());
                }
                if scroll_to_bottom {
                    let mut state = output.state.clone();
                    state.cursor.set_char_range(Some(cursor_at_end(&self.buffer)));
                    state.store(ui.ctx(), output.response.id);
                    ui.scroll_to_rect(bottom_left_strip(output.response.rect), Some(egui::Align::BOTTOM));
                }
            });
    }

    fn render_file_browser(&mut self, ctx: &Context, interactive: bool) {
        let palette = self.palette();
        let title = match self.file_browser_mode {
            FileBrowserMode::Open => "select file to watch",
            FileBrowserMode::Save => "save file as",
        };
        egui::Window::new(title)
            .enabled(interactive)
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("location:");
                    ui.label(self.file_browser.current_dir.to_string_lossy().to_string());
                });
                ui.horizontal(|ui| {
                    ui.label("show:");
                    let mut filter = self.file_browser.filter;
                    ui.selectable_value(&mut filter, FileFilter::Text, FileFilter::Text.label());
                    ui.selectable_value(&mut filter, FileFilter::All, FileFilter::All.label());
                    self.file_browser.set_filter(filter);
                });
                ui.separator();
                egui::ScrollArea::vertical()
                    .max_height(220.0)
                    .show(ui, |ui| {
                        let entries = self.file_browser.entries.clone();
                        for (idx, entry) in entries.iter().enumerate() {
                            let selected = self.file_browser.selected_index == Some(idx);
                            let response = ui.add(
                                FileListItem::new(&entry.name, entry.is_directory, palette)
                                    .selected(selected),
                            );
                            if response.clicked() {
                                self.file_browser.selected_index = Some(idx);
                                if !entry.is_directory && self.file_browser_mode == FileBrowserMode::Save {
                                    self.save_filename = entry.name.clone();
                                }
                            }
                            if response.double_clicked() {
                                if entry.is_directory {
                                    if let Err(e) = self.file_browser.navigate_to(entry.path.clone()) {
                                        tracing::warn!(error = %e, "could not enter directory");
                                    }
                                } else if self.file_browser_mode == FileBrowserMode::Open {
                                    self.show_file_browser = false;
                                    self.select_file(entry.path.clone());
                                }
                            }
                        }
                    });
                if self.file_browser_mode == FileBrowserMode::Save {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label("filename:");
                        ui.text_edit_singleline(&mut self.save_filename);
                    });
                }
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        self.show_file_browser = false;
                    }
                    let action_text = match self.file_browser_mode {
                        FileBrowserMode::Open => "open",
                        FileBrowserMode::Save => "save",
                    };
                    if ui.button(action_text).clicked() {
                        match self.file_browser_mode {
                            FileBrowserMode::Open => {
                                if let Some(entry) = self.file_browser.selected_entry() {
                                    if !entry.is_directory {
                                        let path = entry.path.clone();
                                        self.show_file_browser = false;
                                        self.select_file(path);
                                    }
                                }
                            }
                            FileBrowserMode::Save => {
                                if !self.save_filename.is_empty() {
                                    let path = self.file_browser.save_directory().join(&self.save_filename);
                                    self.show_file_browser = false;
                                    self.save_document_as(path);
                                }
                            }
                        }
                    }
                });
            });
    }

    fn render_error(&mut self, ctx: &Context) {
        let Some(notice) = &self.error else { return };
        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .id(egui::Id::new("error_dialog"))
            .order(egui::Order::Foreground)
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice.message.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed {
            self.error = None;
        }
    }

    fn render_warning(&mut self, ctx: &Context) {
        let Some(notice) = &self.warning else { return };
        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .id(egui::Id::new("watcher_warning"))
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .anchor(Align2::RIGHT_BOTTOM, [-12.0, -36.0])
            .show(ctx, |ui| {
                ui.label(notice.message.as_str());
                ui.add_space(4.0);
                if ui.button("dismiss").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.warning = None;
        }
    }

    fn render_about(&mut self, ctx: &Context, interactive: bool) {
        egui::Window::new("about TailPad")
            .enabled(interactive)
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("TailPad");
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    ui.label("a text viewer that can follow a file");
                });
                ui.add_space(8.0);
                ui.separator();
                ui.label("tick \"watcher\" after selecting a file and TailPad");
                ui.label(format!(
                    "re-reads it every {} seconds, jumping to the end",
                    self.controller.watcher().interval().as_secs()
                ));
                ui.label("whenever it changed on disk.");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }

    fn render_shortcuts(&mut self, ctx: &Context, interactive: bool) {
        egui::Window::new("keyboard shortcuts")
            .enabled(interactive)
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("File").strong());
                ui.separator();
                shortcut_row(ui, "\u{2318}O", "Open / select file");
                shortcut_row(ui, "\u{2318}S", "Save");
                shortcut_row(ui, "\u{21e7}\u{2318}S", "Save as");
                ui.add_space(8.0);
                ui.label(egui::RichText::new("View").strong());
                ui.separator();
                shortcut_row(ui, "\u{2318}=", "Larger font");
                shortcut_row(ui, "\u{2318}-", "Smaller font");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_shortcuts = false;
                    }
                });
            });
    }
}

/// Collapsed cursor after the last character of `text`.
fn cursor_at_end(text: &str) -> egui::text::CCursorRange {
    egui::text::CCursorRange::one(egui::text::CCursor::new(text.chars().count()))
}

/// Zero-width strip on the last row of `rect`. Scrolling to it moves the view
/// down without pulling it sideways to the end of the longest line.
fn bottom_left_strip(rect: egui::Rect) -> egui::Rect {
    let bottom = rect.bottom();
    egui::Rect::from_min_max(
        egui::pos2(rect.left(), (bottom - 1.0).max(rect.top())),
        egui::pos2(rect.left(), bottom),
    )
}

fn shortcut_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(shortcut).monospace().strong());
        ui.add_space(20.0);
        ui.label(description);
    });
}

impl TailPadApp {
    fn show(&mut self, ctx: &Context) {
        self.repaint.begin_frame();
        self.apply_theme(ctx);

        // an open error dialog blocks everything behind it
        let interactive = self.error.is_none();
        if interactive {
            self.handle_keyboard(ctx);
            let dropped: Option<PathBuf> = ctx.input(|i| {
                i.raw.dropped_files.iter().find_map(|f| f.path.clone())
            });
            if let Some(path) = dropped {
                self.select_file(path);
            }
        }

        self.controller.poll(Instant::now());
        self.process_signals();

        let palette = self.palette();
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.add_enabled_ui(interactive, |ui| self.render_menu_bar(ui));
        });
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            PadTheme::title_bar_frame(palette).show(ui, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(self.display_title());
                });
            });
        });
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_enabled_ui(interactive, |ui| self.render_toolbar(ui));
        });
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar(ui, palette, &self.status_text());
        });
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(palette.paper).inner_margin(egui::Margin::same(4.0)))
            .show(ctx, |ui| {
                ui.add_enabled_ui(interactive, |ui| self.render_editor(ui));
            });

        if self.show_file_browser {
            self.render_file_browser(ctx, interactive);
        }
        if self.show_about {
            self.render_about(ctx, interactive);
        }
        if self.show_shortcuts {
            self.render_shortcuts(ctx, interactive);
        }
        self.render_warning(ctx);
        self.render_error(ctx);

        // operations triggered by this frame's widgets
        self.process_signals();

        if let Some(deadline) = self.controller.next_wake() {
            self.repaint.wake_at(deadline);
        }
        self.repaint.end_frame(ctx);
    }
}

impl eframe::App for TailPadApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
