use eframe::egui::{self, Color32, RichText, Ui};
use gradpay::data::model::Metric;

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – run parameters
// ---------------------------------------------------------------------------

/// Render the left parameter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Parameters");
    ui.separator();

    let mut changed = false;
    let config = &mut state.config;

    ui.strong("Salary metric");
    egui::ComboBox::from_id_salt("salary_metric")
        .selected_text(config.salary_metric.column())
        .show_ui(ui, |ui: &mut Ui| {
            for metric in Metric::ALL {
                changed |= ui
                    .selectable_value(&mut config.salary_metric, metric, metric.column())
                    .changed();
            }
        });
    ui.add_space(4.0);

    ui.strong("Trailing window (years)");
    changed |= ui
        .add(egui::DragValue::new(&mut config.trailing_window).range(2..=20))
        .changed();
    ui.add_space(4.0);

    ui.strong("Forecast year");
    changed |= ui
        .add(egui::DragValue::new(&mut config.forecast_year).range(2000..=2100))
        .changed();
    ui.separator();

    ui.strong("Output directory");
    ui.label(config.output_dir.display().to_string());
    if ui.small_button("Change…").clicked() {
        if let Some(dir) = rfd::FileDialog::new()
            .set_title("Choose output directory")
            .pick_folder()
        {
            config.output_dir = dir;
        }
    }

    if changed {
        state.recompute();
    }

    if state.active_tab == Tab::Relationships {
        if let Some(report) = &state.relationships {
            ui.separator();
            ui.strong("Scatter");
            for (i, frame) in report.frames.iter().enumerate() {
                ui.radio_value(&mut state.selected_pair, i, frame.pair.name);
            }
        }
    }
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
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export results"))
                .clicked()
            {
                state.export();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.active_tab, Tab::Dataset, "Dataset");
        ui.selectable_value(&mut state.active_tab, Tab::Projections, "Projections");
        ui.selectable_value(&mut state.active_tab, Tab::Relationships, "Relationships");

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows, {} cohorts projected",
                ds.len(),
                state.projections.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Exported") {
                Color32::LIGHT_GREEN
            } else {
                Color32::RED
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open cleaned survey data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
