use eframe::egui::{self, RichText, Ui};

use crate::dashboard::MetricTile;
use crate::error::DashboardError;

/// The four summary tiles, two per column, inside a framed group.
pub fn metric_tiles(ui: &mut Ui, metrics: &Result<Vec<MetricTile>, DashboardError>) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        let tiles = match metrics {
            Ok(tiles) => tiles,
            Err(e) => {
                ui.label(RichText::new(format!("Metrics unavailable: {e}")).italics());
                return;
            }
        };

        let half = tiles.len().div_ceil(2);
        ui.columns(2, |cols: &mut [Ui]| {
            for (i, tile) in tiles.iter().enumerate() {
                let col = &mut cols[if i < half { 0 } else { 1 }];
                tile_widget(col, tile);
            }
        });
    });
}

fn tile_widget(ui: &mut Ui, tile: &MetricTile) {
    ui.add_space(4.0);
    let label = ui.label(RichText::new(tile.label).weak());
    if let Some(help) = tile.help {
        label.on_hover_text(help);
    }
    ui.label(RichText::new(tile.display()).size(28.0).strong());
    ui.add_space(4.0);
}
