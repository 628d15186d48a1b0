//! Per-cohort salary projection.
//!
//! Every (degree, university) cohort is a yearly salary series. The trailing
//! window of each series gets a least-squares line which is extrapolated to
//! the forecast year; cohorts are then ranked by the projected value.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::stats::{round2, LinearFit};
use crate::data::model::{Metric, SurveyDataset, SurveyRecord};
use crate::error::{Error, Result};

/// Cohort identity: `(degree, university)`.
pub type GroupKey = (String, String);

/// Parameters of one projection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Most recent rows of each cohort used for the fit.
    pub trailing_window: usize,
    pub forecast_year: i32,
    /// Series being projected.
    pub salary_metric: Metric,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            trailing_window: 5,
            forecast_year: 2024,
            salary_metric: Metric::GrossMonthlyMedian,
        }
    }
}

/// One projected cohort, full precision.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryProjection {
    pub degree: String,
    pub university: String,
    pub first_year: i32,
    pub last_year: i32,
    pub last_actual: f64,
    pub forecast_year: i32,
    pub predicted: f64,
    pub change_amount: f64,
    /// `inf`/`NaN` when the last actual value is zero.
    pub change_percentage: f64,
    pub trend_slope: f64,
    pub years_used: usize,
}

impl SalaryProjection {
    pub fn data_range(&self) -> String {
        format!("{}-{}", self.first_year, self.last_year)
    }

    pub fn method(&self) -> String {
        format!(
            "Linear Trend (last {} years: {})",
            self.years_used,
            self.data_range()
        )
    }
}

/// Presentation row: the projection table exactly as it is displayed and
/// written, floats rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    pub degree: String,
    pub university: String,
    pub method: String,
    pub last_year: i32,
    pub last_actual_median: f64,
    pub forecast_year: i32,
    pub predicted_median: f64,
    pub change_amount: f64,
    pub change_percentage: f64,
    pub trend_slope: f64,
    pub years_used: usize,
    pub data_range: String,
}

impl From<&SalaryProjection> for ProjectionRow {
    fn from(p: &SalaryProjection) -> Self {
        ProjectionRow {
            degree: p.degree.clone(),
            university: p.university.clone(),
            method: p.method(),
            last_year: p.last_year,
            last_actual_median: round2(p.last_actual),
            forecast_year: p.forecast_year,
            predicted_median: round2(p.predicted),
            change_amount: round2(p.change_amount),
            change_percentage: round2(p.change_percentage),
            trend_slope: round2(p.trend_slope),
            years_used: p.years_used,
            data_range: p.data_range(),
        }
    }
}

impl ProjectionRow {
    pub const COLUMNS: [&'static str; 12] = [
        "degree",
        "university",
        "method",
        "last_year",
        "last_actual_median",
        "forecast_year",
        "predicted_median",
        "change_amount",
        "change_percentage",
        "trend_slope",
        "years_used",
        "data_range",
    ];

    /// Cells in `COLUMNS` order, for table widgets.
    pub fn cells(&self) -> [String; 12] {
        [
            self.degree.clone(),
            self.university.clone(),
            self.method.clone(),
            self.last_year.to_string(),
            format!("{:.2}", self.last_actual_median),
            self.forecast_year.to_string(),
            format!("{:.2}", self.predicted_median),
            format!("{:.2}", self.change_amount),
            format!("{:.2}", self.change_percentage),
            format!("{:.2}", self.trend_slope),
            self.years_used.to_string(),
            self.data_range.clone(),
        ]
    }
}

/// Partition rows into cohorts. Rows without degree, university or year
/// cannot be placed in a series and are left out.
pub fn group_records(dataset: &SurveyDataset) -> BTreeMap<GroupKey, Vec<&SurveyRecord>> {
    let mut groups: BTreeMap<GroupKey, Vec<&SurveyRecord>> = BTreeMap::new();
    let mut unplaced = 0usize;

    for rec in &dataset.records {
        match (&rec.degree, &rec.university, rec.year) {
            (Some(degree), Some(university), Some(_)) => groups
                .entry((degree.clone(), university.clone()))
                .or_default()
                .push(rec),
            _ => unplaced += 1,
        }
    }

    if unplaced > 0 {
        log::warn!("{unplaced} rows lack degree, university or year and were not grouped");
    }
    groups
}

/// Fit and extrapolate a single cohort.
///
/// `None` when fewer than two rows of the trailing window carry a salary.
pub fn project_group(
    key: &GroupKey,
    records: &[&SurveyRecord],
    params: &ProjectionParams,
) -> Option<SalaryProjection> {
    let mut series: Vec<&SurveyRecord> = records.iter().copied().filter(|r| r.year.is_some()).collect();
    series.sort_by_key(|r| r.year);

    let start = series.len().saturating_sub(params.trailing_window);
    let usable: Vec<(i32, f64)> = series[start..]
        .iter()
        .filter_map(|r| Some((r.year?, r.metric(params.salary_metric)?)))
        .collect();

    if usable.len() < 2 {
        log::debug!(
            "skipping {} / {}: {} usable rows in window",
            key.0,
            key.1,
            usable.len()
        );
        return None;
    }

    let points: Vec<(f64, f64)> = usable.iter().map(|&(y, s)| (y as f64, s)).collect();
    let fit = LinearFit::fit(&points)?;

    let first_year = usable.iter().map(|&(y, _)| y).min()?;
    let last_year = usable.iter().map(|&(y, _)| y).max()?;
    let last_actual = usable
        .iter()
        .find(|&&(y, _)| y == last_year)
        .map(|&(_, s)| s)?;

    let predicted = fit.predict(params.forecast_year as f64);
    let change_amount = predicted - last_actual;

    Some(SalaryProjection {
        degree: key.0.clone(),
        university: key.1.clone(),
        first_year,
        last_year,
        last_actual,
        forecast_year: params.forecast_year,
        predicted,
        change_amount,
        change_percentage: change_amount / last_actual * 100.0,
        trend_slope: fit.slope,
        years_used: usable.len(),
    })
}

/// Descending by prediction; `NaN` last.
fn by_prediction_desc(a: &SalaryProjection, b: &SalaryProjection) -> Ordering {
    match (a.predicted.is_nan(), b.predicted.is_nan()) {
        (false, false) => b.predicted.total_cmp(&a.predicted),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}

/// Project every cohort of the dataset and rank by projected salary.
pub fn project_salaries(
    dataset: &SurveyDataset,
    params: &ProjectionParams,
) -> Result<Vec<SalaryProjection>> {
    let required = [
        "year",
        "degree",
        "university",
        params.salary_metric.column(),
    ];
    if let Some(missing) = required.iter().find(|c| !dataset.has_column(c)) {
        return Err(Error::MissingColumn {
            column: missing.to_string(),
            operation: "salary projection",
        });
    }

    let groups = group_records(dataset);
    let mut projections: Vec<SalaryProjection> = groups
        .iter()
        .filter_map(|(key, records)| project_group(key, records, params))
        .collect();
    projections.sort_by(by_prediction_desc);

    log::info!(
        "Projected {} of {} cohorts to {}",
        projections.len(),
        groups.len(),
        params.forecast_year
    );
    Ok(projections)
}

/// Rounded presentation rows in ranking order.
pub fn projection_rows(projections: &[SalaryProjection]) -> Vec<ProjectionRow> {
    projections.iter().map(ProjectionRow::from).collect()
}
