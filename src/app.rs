use eframe::egui;
use gradpay::config::AnalysisConfig;

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GradPayApp {
    pub state: AppState,
}

impl GradPayApp {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            state: AppState::with_config(config),
        }
    }

    /// Load the configured input if it exists; otherwise wait for File → Open.
    pub fn open_configured_input(&mut self) {
        let path = self.state.config.input_path.clone();
        if path.is_file() {
            self.state.open(&path);
        } else {
            log::info!("{} not found, waiting for a file to be opened", path.display());
        }
    }
}

impl eframe::App for GradPayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: parameters ----
        egui::SidePanel::left("parameter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.active_tab {
            Tab::Dataset => table::dataset_table(ui, &self.state),
            Tab::Projections => table::projection_table(ui, &self.state),
            Tab::Relationships => {
                table::summary_table(ui, &self.state);
                ui.separator();
                plot::relationship_plot(ui, &self.state);
            }
        });
    }
}
