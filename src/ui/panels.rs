use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::ConditionSelector;
use crate::state::{AppState, FinanceTab, TrendTab};
use crate::ui::{plot, tiles};

pub const PAGE_TITLE: &str = "Financial Insights Dashboard: Loan Performance & Trends";

const FEATURES: [(&str, &str); 4] = [
    ("Overview", "Provides a summary of key loan metrics."),
    ("Time-Based Analysis", "Shows trends over time and loan amounts."),
    ("Loan Performance", "Analyzes loan conditions and distributions."),
    ("Financial Analysis", "Examines loan amounts and distributions based on conditions."),
];

// ---------------------------------------------------------------------------
// Left side panel – dashboard notes
// ---------------------------------------------------------------------------

/// Render the left panel describing the dashboard sections and the
/// categories present in the loaded data.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Dashboard Filters and Features");
    ui.separator();

    for (name, text) in FEATURES {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label("•");
            ui.label(RichText::new(format!("{name}:")).strong());
            ui.label(text);
        });
        ui.add_space(2.0);
    }

    let Some(ds) = &state.dataset else { return };
    ui.add_space(8.0);
    ui.separator();
    ui.label(RichText::new("Loaded data").strong());
    ui.label(format!("Terms: {}", ds.terms.join(", ")));
    ui.label(format!("Grades: {}", ds.grades.join(", ")));
    ui.label(format!("Purposes: {}", ds.purposes.len()))
        .on_hover_text(ds.purposes.join("\n"));
}

// ---------------------------------------------------------------------------
// Central panel – the dashboard page
// ---------------------------------------------------------------------------

/// Render the dashboard page, or the load error when there is no data.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new(PAGE_TITLE).size(26.0));
            ui.separator();

            if let Some(err) = &state.load_error {
                ui.label(RichText::new("The loan dataset could not be loaded.").strong());
                ui.label(RichText::new(err).color(Color32::RED));
                ui.label("Open another file with File → Open… to continue.");
                return;
            }

            let Some(view) = state.view.clone() else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a file to view loans  (File → Open…)");
                });
                return;
            };

            // ---- Overview ----
            tiles::metric_tiles(ui, &view.metrics);
            ui.add_space(8.0);

            // ---- Time-based analysis ----
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    for tab in TrendTab::ALL {
                        ui.selectable_value(&mut state.trend_tab, tab, tab.title());
                    }
                });
                ui.separator();
                match state.trend_tab {
                    TrendTab::LoansOverTime => plot::chart(ui, &view.loans_over_time),
                    TrendTab::AmountOverTime => plot::chart(ui, &view.amount_over_time),
                    TrendTab::IssueDate => plot::chart(ui, &view.loans_by_weekday),
                }
            });
            ui.add_space(8.0);

            // ---- Loan performance ----
            ui.heading("Loan Performance");
            egui::CollapsingHeader::new("Click Here to Expand Visualization")
                .id_salt("loan_performance")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.columns(2, |cols: &mut [Ui]| {
                        plot::chart(&mut cols[0], &view.loans_by_condition);
                        plot::chart(&mut cols[1], &view.loans_by_grade);
                    });
                });
            ui.add_space(8.0);

            // ---- Financial analysis ----
            ui.heading("Financial Analysis");
            condition_selector(ui, state);

            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    for tab in FinanceTab::ALL {
                        ui.selectable_value(&mut state.finance_tab, tab, tab.title());
                    }
                });
                // Re-read: the selector above may have re-rendered.
                let Some(view) = &state.view else { return };
                ui.label(
                    RichText::new(format!("{} loans match '{}'", view.filtered_rows, view.selector)).weak(),
                );
                ui.separator();
                match state.finance_tab {
                    FinanceTab::ByPeriod => plot::chart(ui, &view.amount_histogram),
                    FinanceTab::ByPurpose => plot::chart(ui, &view.amount_by_purpose),
                }
            });
        });
}

fn condition_selector(ui: &mut Ui, state: &mut AppState) {
    let current = state.selector.to_string();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Loan Condition");
        egui::ComboBox::from_id_salt("loan_condition")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for option in ConditionSelector::options() {
                    if ui.selectable_label(current == option, option).clicked() {
                        // Rejections are logged and surfaced in the top bar.
                        let _ = state.set_condition(option);
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} loans loaded", ds.len()));
            if let Some(view) = &state.view {
                ui.label(format!("{} '{}' loans", view.filtered_rows, view.selector));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open loan data")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => state.set_load_error(&e),
        }
    }
}
