use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};
use gradpay::analysis::ProjectionRow;
use gradpay::data::model::{IdColumn, Metric};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Generic table rendering
// ---------------------------------------------------------------------------

/// Render a header plus `n_rows` rows whose cells come from `cell(row, col)`.
fn text_table(
    ui: &mut Ui,
    id: &str,
    header: &[&str],
    n_rows: usize,
    cell: impl Fn(usize, usize) -> String,
) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(60.0), header.len())
            .header(20.0, |mut row| {
                for name in header {
                    row.col(|ui: &mut Ui| {
                        ui.strong(*name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, n_rows, |mut row| {
                    let idx = row.index();
                    for col in 0..header.len() {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell(idx, col));
                        });
                    }
                });
            });
    });
}

fn empty_hint(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a cleaned survey table  (File → Open…)");
    });
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// The loaded table after coercion.
pub fn dataset_table(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        empty_hint(ui);
        return;
    };

    let header: Vec<&str> = IdColumn::ALL
        .iter()
        .map(|c| c.column())
        .chain(Metric::ALL.iter().map(|m| m.column()))
        .collect();

    text_table(ui, "dataset_table", &header, ds.len(), |row, col| {
        let rec = &ds.records[row];
        match IdColumn::ALL.get(col) {
            Some(&id) => rec.id_text(id),
            None => number(rec.metric(Metric::ALL[col - IdColumn::ALL.len()])),
        }
    });
}

/// Ranked salary projections.
pub fn projection_table(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        empty_hint(ui);
        return;
    }
    if state.projections.is_empty() {
        ui.label("No cohort has enough data for a projection.");
        return;
    }

    let cells: Vec<[String; 12]> = state.projections.iter().map(ProjectionRow::cells).collect();
    text_table(
        ui,
        "projection_table",
        &ProjectionRow::COLUMNS,
        cells.len(),
        |row, col| cells[row][col].clone(),
    );
}

/// Correlation summary, one row per relationship.
pub fn summary_table(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.relationships else {
        if state.dataset.is_none() {
            empty_hint(ui);
        }
        return;
    };

    let header = ["relationship_name", "x_col", "y_col", "pearson_r", "n"];
    text_table(ui, "summary_table", &header, report.summary.len(), |row, col| {
        let s = &report.summary[row];
        match col {
            0 => s.relationship_name.clone(),
            1 => s.x_col.clone(),
            2 => s.y_col.clone(),
            3 if s.pearson_r.is_nan() => "NaN".to_string(),
            3 => format!("{:.4}", s.pearson_r),
            _ => s.n.to_string(),
        }
    });
}
