use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LoanInsightsApp {
    pub state: AppState,
}

impl LoanInsightsApp {
    /// Start with the configured selector and try the configured dataset.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::new(config.initial_condition);
        match crate::data::loader::load_file(&config.data_path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => state.set_load_error(&e),
        }
        Self { state }
    }
}

impl eframe::App for LoanInsightsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dashboard notes ----
        egui::SidePanel::left("features_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::dashboard(ui, &mut self.state);
        });
    }
}
