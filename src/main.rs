mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::GradPayApp;
use eframe::egui;
use gradpay::config::AnalysisConfig;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional JSON config as the first argument.
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => AnalysisConfig::from_file(&path).unwrap_or_else(|e| {
            log::error!("Ignoring config {}: {e}", path.display());
            AnalysisConfig::default()
        }),
        None => AnalysisConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GradPay – Graduate Employment Survey",
        options,
        Box::new(move |_cc| {
            let mut app = GradPayApp::new(config);
            app.open_configured_input();
            Ok(Box::new(app))
        }),
    )
}
