mod app;
mod charts;
mod color;
mod config;
mod dashboard;
mod data;
mod error;
mod format;
mod state;
mod ui;

use app::LoanInsightsApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::info!("Starting dashboard with data from {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    let app = LoanInsightsApp::new(&config);
    eframe::run_native(
        &config.window_title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
