mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::TextFrameApp;
use config::PresentationConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = PresentationConfig::load_or_default(Path::new("textframe.json"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TextFrame – Tabular Text Annotator",
        options,
        Box::new(move |_cc| Ok(Box::new(TextFrameApp::new(config)))),
    )
}
