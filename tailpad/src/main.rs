//! TailPad - a minimal text viewer with a tail mode
//!
//! Opens with nothing bound. Pick a file, tick "watcher", and the window
//! re-reads it every few seconds, following the end like `tail -f`.

mod app;

use app::TailPadApp;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    padcore::logging::init("tailpad");

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_title("TailPad"),
        ..Default::default()
    };

    eframe::run_native(
        "TailPad",
        options,
        Box::new(|cc| Box::new(TailPadApp::new(cc))),
    )
}
