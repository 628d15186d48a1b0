use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Relationship scatter plot
// ---------------------------------------------------------------------------

/// Scatter of the selected aligned frame, one series per university.
pub fn relationship_plot(ui: &mut Ui, state: &AppState) {
    let Some(frame) = state
        .relationships
        .as_ref()
        .and_then(|r| r.frames.get(state.selected_pair))
    else {
        return;
    };

    if frame.is_empty() {
        ui.label(format!("{}: no rows with both metrics present.", frame.pair.name));
        return;
    }

    let slot = frame.university_slot();
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for row in &frame.rows {
        let university = slot.map(|i| row.ids[i].as_str()).unwrap_or("all rows");
        series.entry(university).or_default().push([row.x, row.y]);
    }

    Plot::new("relationship_plot")
        .legend(Legend::default())
        .x_axis_label(frame.pair.x.column())
        .y_axis_label(frame.pair.y.column())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (university, points) in series {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(university))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let points = Points::new(PlotPoints::from(points))
                    .name(university)
                    .color(color)
                    .radius(3.0);

                plot_ui.points(points);
            }
        });
}
