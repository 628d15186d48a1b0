use std::path::Path;

use gradpay::analysis::{
    analyze_relationships, project_salaries, projection_rows, ProjectionRow, RelationshipReport,
};
use gradpay::config::AnalysisConfig;
use gradpay::data::model::SurveyDataset;
use gradpay::report;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dataset,
    Projections,
    Relationships,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<SurveyDataset>,

    /// Paths and model parameters.
    pub config: AnalysisConfig,

    pub active_tab: Tab,

    /// Ranked projection table for the current dataset and parameters.
    pub projections: Vec<ProjectionRow>,

    /// Aligned frames and correlation summary.
    pub relationships: Option<RelationshipReport>,

    /// Which relationship frame the scatter plot shows.
    pub selected_pair: usize,

    /// University colours for the scatter plot.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Load a table from disk and make it current.
    pub fn open(&mut self, path: &Path) {
        match gradpay::data::loader::load_file(path) {
            Ok(dataset) => {
                self.config.input_path = path.to_path_buf();
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and compute both result tables.
    pub fn set_dataset(&mut self, dataset: SurveyDataset) {
        self.color_map = Some(ColorMap::new(&dataset.universities));
        self.dataset = Some(dataset);
        self.selected_pair = 0;
        self.status_message = None;
        self.recompute();
    }

    /// Re-run both computations with the current parameters.
    pub fn recompute(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };

        let mut problems = Vec::new();

        match project_salaries(ds, &self.config.projection_params()) {
            Ok(projections) => self.projections = projection_rows(&projections),
            Err(e) => {
                self.projections.clear();
                problems.push(format!("Projection: {e}"));
            }
        }

        match analyze_relationships(ds, self.config.salary_metric) {
            Ok(report) => self.relationships = Some(report),
            Err(e) => {
                self.relationships = None;
                problems.push(format!("Relationships: {e}"));
            }
        }

        self.status_message = (!problems.is_empty()).then(|| problems.join("; "));
    }

    /// Write every available result table to the output directory.
    pub fn export(&mut self) {
        let dir = self.config.output_dir.clone();
        let result = report::write_projections(&dir, &self.projections).and_then(|first| {
            let mut paths = vec![first];
            if let Some(rel) = &self.relationships {
                paths.extend(report::write_relationship_report(&dir, rel)?);
            }
            Ok(paths)
        });

        self.status_message = Some(match result {
            Ok(paths) => format!("Exported {} tables to {}", paths.len(), dir.display()),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                format!("Error: {e:#}")
            }
        });
    }
}
