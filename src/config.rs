//! Analysis configuration
//!
//! Every path and parameter a run needs is passed in explicitly. Values come
//! from `AnalysisConfig::default()` or a JSON file; missing keys fall back to
//! the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::ProjectionParams;
use crate::data::model::Metric;
use crate::error::{Error, Result};

/// Input, output and model parameters for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Cleaned survey table (`.csv`, `.json` or `.parquet`)
    pub input_path: PathBuf,

    /// Directory receiving the result tables
    pub output_dir: PathBuf,

    /// Salary column projected and correlated against employment rates
    pub salary_metric: Metric,

    /// Most recent rows per cohort used for the trend fit
    pub trailing_window: usize,

    /// Year the trend is extrapolated to
    pub forecast_year: i32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("cleaned.csv"),
            output_dir: PathBuf::from("."),
            salary_metric: Metric::GrossMonthlyMedian,
            trailing_window: 5,
            forecast_year: 2024,
        }
    }
}

impl AnalysisConfig {
    /// Load a JSON configuration file and validate it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.trailing_window < 2 {
            return Err(Error::InvalidConfig(format!(
                "trailing_window must be at least 2 to fit a line, got {}",
                self.trailing_window
            )));
        }
        Ok(())
    }

    pub fn projection_params(&self) -> ProjectionParams {
        ProjectionParams {
            trailing_window: self.trailing_window,
            forecast_year: self.forecast_year,
            salary_metric: self.salary_metric,
        }
    }
}
