#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod helpers;
mod modules;
mod theme;

fn main() -> eframe::Result {
    streamcut_media::init().expect("FFmpeg init failed");

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("✂ StreamCut")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([880.0, 560.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "StreamCut",
        native_options,
        Box::new(|cc| Ok(Box::new(app::StreamCutApp::new(cc)))),
    )
}
