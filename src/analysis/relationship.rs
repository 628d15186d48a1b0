//! Employment rate vs salary relationships.

use serde::Serialize;

use super::stats::pearson;
use crate::data::model::{IdColumn, Metric, SurveyDataset};
use crate::error::{Error, Result};

/// One analysed `(x, y)` metric pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipPair {
    pub name: &'static str,
    /// File stem used when the aligned frame is written out.
    pub file_stem: &'static str,
    pub x: Metric,
    pub y: Metric,
}

impl RelationshipPair {
    /// The two fixed pairs, in reporting order.
    pub fn employment_vs(salary: Metric) -> [RelationshipPair; 2] {
        [
            RelationshipPair {
                name: "employment_rate_overall_vs_salary",
                file_stem: "employment_rate_vs_salary",
                x: Metric::EmploymentRateOverall,
                y: salary,
            },
            RelationshipPair {
                name: "employment_rate_ft_perm_vs_salary",
                file_stem: "ft_perm_vs_salary",
                x: Metric::EmploymentRateFtPerm,
                y: salary,
            },
        ]
    }
}

/// A row of an aligned frame. Identifying fields are kept as display text,
/// empty when the source cell was missing.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRow {
    pub ids: Vec<String>,
    pub x: f64,
    pub y: f64,
}

/// Rows where both metrics of a pair are present.
#[derive(Debug, Clone, PartialEq)]
pub struct PairFrame {
    pub pair: RelationshipPair,
    /// Identifying columns that exist in the input, in output order.
    pub id_columns: Vec<IdColumn>,
    pub rows: Vec<PairRow>,
}

impl PairFrame {
    pub fn header(&self) -> Vec<String> {
        self.id_columns
            .iter()
            .map(|c| c.column().to_string())
            .chain([self.pair.x.column().to_string(), self.pair.y.column().to_string()])
            .collect()
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.rows.iter().map(|r| (r.x, r.y)).collect()
    }

    /// Position of `university` in `ids`, if the column was present.
    pub fn university_slot(&self) -> Option<usize> {
        self.id_columns.iter().position(|c| *c == IdColumn::University)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Summary line for one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipSummary {
    pub relationship_name: String,
    pub x_col: String,
    pub y_col: String,
    /// `NaN` when undefined.
    pub pearson_r: f64,
    pub n: usize,
}

/// Frames and summary for both pairs, in pair order.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipReport {
    pub frames: Vec<PairFrame>,
    pub summary: Vec<RelationshipSummary>,
}

/// Build the aligned frame of one pair.
pub fn relationship_frame(dataset: &SurveyDataset, pair: RelationshipPair) -> Result<PairFrame> {
    for metric in [pair.x, pair.y] {
        if !dataset.has_column(metric.column()) {
            return Err(Error::MissingColumn {
                column: metric.column().to_string(),
                operation: "relationship analysis",
            });
        }
    }

    let id_columns = dataset.id_columns();
    let rows = dataset
        .records
        .iter()
        .filter_map(|rec| {
            let x = rec.metric(pair.x)?;
            let y = rec.metric(pair.y)?;
            Some(PairRow {
                ids: id_columns.iter().map(|&c| rec.id_text(c)).collect(),
                x,
                y,
            })
        })
        .collect();

    Ok(PairFrame {
        pair,
        id_columns,
        rows,
    })
}

pub fn summarize(frame: &PairFrame) -> RelationshipSummary {
    RelationshipSummary {
        relationship_name: frame.pair.name.to_string(),
        x_col: frame.pair.x.column().to_string(),
        y_col: frame.pair.y.column().to_string(),
        pearson_r: pearson(&frame.points()),
        n: frame.len(),
    }
}

/// Analyse both employment-rate pairs against `salary`.
pub fn analyze_relationships(dataset: &SurveyDataset, salary: Metric) -> Result<RelationshipReport> {
    let frames = RelationshipPair::employment_vs(salary)
        .into_iter()
        .map(|pair| relationship_frame(dataset, pair))
        .collect::<Result<Vec<_>>>()?;
    let summary: Vec<RelationshipSummary> = frames.iter().map(summarize).collect();

    for s in &summary {
        log::info!("{}: r = {:.4} over {} rows", s.relationship_name, s.pearson_r, s.n);
    }
    Ok(RelationshipReport { frames, summary })
}
