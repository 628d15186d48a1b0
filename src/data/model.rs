use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ---------------------------------------------------------------------------
// Metric – the eight numeric survey columns
// ---------------------------------------------------------------------------

/// A numeric column of the cleaned survey table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    EmploymentRateOverall,
    EmploymentRateFtPerm,
    BasicMonthlyMean,
    BasicMonthlyMedian,
    GrossMonthlyMean,
    GrossMonthlyMedian,
    #[serde(rename = "gross_mthly_25_percentile")]
    GrossMthly25Percentile,
    #[serde(rename = "gross_mthly_75_percentile")]
    GrossMthly75Percentile,
}

impl Metric {
    /// All metrics in header order.
    pub const ALL: [Metric; 8] = [
        Metric::EmploymentRateOverall,
        Metric::EmploymentRateFtPerm,
        Metric::BasicMonthlyMean,
        Metric::BasicMonthlyMedian,
        Metric::GrossMonthlyMean,
        Metric::GrossMonthlyMedian,
        Metric::GrossMthly25Percentile,
        Metric::GrossMthly75Percentile,
    ];

    /// Column name in the source table.
    pub fn column(self) -> &'static str {
        match self {
            Metric::EmploymentRateOverall => "employment_rate_overall",
            Metric::EmploymentRateFtPerm => "employment_rate_ft_perm",
            Metric::BasicMonthlyMean => "basic_monthly_mean",
            Metric::BasicMonthlyMedian => "basic_monthly_median",
            Metric::GrossMonthlyMean => "gross_monthly_mean",
            Metric::GrossMonthlyMedian => "gross_monthly_median",
            Metric::GrossMthly25Percentile => "gross_mthly_25_percentile",
            Metric::GrossMthly75Percentile => "gross_mthly_75_percentile",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.column() == name)
            .ok_or_else(|| Error::UnknownMetric(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// IdColumn – identifying (non-numeric) columns
// ---------------------------------------------------------------------------

/// Identifying columns carried through to relationship frames, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdColumn {
    Year,
    University,
    School,
    Degree,
}

impl IdColumn {
    pub const ALL: [IdColumn; 4] = [
        IdColumn::Year,
        IdColumn::University,
        IdColumn::School,
        IdColumn::Degree,
    ];

    pub fn column(self) -> &'static str {
        match self {
            IdColumn::Year => "year",
            IdColumn::University => "university",
            IdColumn::School => "school",
            IdColumn::Degree => "degree",
        }
    }
}

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

/// Coerce raw cell text to a number. Anything unparseable is missing.
///
/// `NaN` text counts as missing; infinities are kept.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Coerce raw cell text to a survey year.
///
/// Accepts `2019` and the float form `2019.0` that dataframe exports produce
/// once a column has held a missing value.
pub fn coerce_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(y) = raw.parse::<i32>() {
        return Some(y);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

fn coerce_text(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

// ---------------------------------------------------------------------------
// SurveyRecord – one row of the cleaned table
// ---------------------------------------------------------------------------

/// One (year, university, school, degree) row with its coerced metrics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyRecord {
    pub year: Option<i32>,
    pub university: Option<String>,
    pub school: Option<String>,
    pub degree: Option<String>,
    metrics: [Option<f64>; 8],
}

impl SurveyRecord {
    pub fn new(year: i32, university: &str, school: &str, degree: &str) -> Self {
        SurveyRecord {
            year: Some(year),
            university: coerce_text(university),
            school: coerce_text(school),
            degree: coerce_text(degree),
            metrics: [None; 8],
        }
    }

    /// Builder-style metric setter, mostly for in-memory tables.
    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        self.set_metric(metric, Some(value));
        self
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics[metric.index()]
    }

    pub fn set_metric(&mut self, metric: Metric, value: Option<f64>) {
        self.metrics[metric.index()] = value.filter(|v| !v.is_nan());
    }

    /// Store a raw cell under its header name.
    ///
    /// Unknown columns are ignored. Returns `true` when a non-empty cell had
    /// to be coerced to missing.
    pub fn assign(&mut self, column: &str, raw: &str) -> bool {
        let blank = raw.trim().is_empty();
        match column {
            "year" => {
                self.year = coerce_year(raw);
                !blank && self.year.is_none()
            }
            "university" => {
                self.university = coerce_text(raw);
                false
            }
            "school" => {
                self.school = coerce_text(raw);
                false
            }
            "degree" => {
                self.degree = coerce_text(raw);
                false
            }
            other => match other.parse::<Metric>() {
                Ok(metric) => {
                    let value = coerce_numeric(raw);
                    self.metrics[metric.index()] = value;
                    !blank && value.is_none()
                }
                Err(_) => false,
            },
        }
    }

    /// Text of an identifying column, empty when missing.
    pub fn id_text(&self, column: IdColumn) -> String {
        match column {
            IdColumn::Year => self.year.map(|y| y.to_string()).unwrap_or_default(),
            IdColumn::University => self.university.clone().unwrap_or_default(),
            IdColumn::School => self.school.clone().unwrap_or_default(),
            IdColumn::Degree => self.degree.clone().unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full coerced table plus the header it was read with.
#[derive(Debug, Clone, Default)]
pub struct SurveyDataset {
    pub records: Vec<SurveyRecord>,
    /// Header column names in source order (extra columns included).
    pub columns: Vec<String>,
    /// Distinct universities, used for colouring and labels.
    pub universities: BTreeSet<String>,
}

impl SurveyDataset {
    pub fn new(columns: Vec<String>, records: Vec<SurveyRecord>) -> Self {
        let universities = records
            .iter()
            .filter_map(|r| r.university.clone())
            .collect();
        SurveyDataset {
            records,
            columns,
            universities,
        }
    }

    /// Dataset with the full cleaned-table header.
    pub fn from_records(records: Vec<SurveyRecord>) -> Self {
        let columns = IdColumn::ALL
            .iter()
            .map(|c| c.column().to_string())
            .chain(Metric::ALL.iter().map(|m| m.column().to_string()))
            .collect();
        Self::new(columns, records)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Identifying columns present in the header, in output order.
    pub fn id_columns(&self) -> Vec<IdColumn> {
        IdColumn::ALL
            .into_iter()
            .filter(|c| self.has_column(c.column()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_numeric_handles_junk() {
        assert_eq!(coerce_numeric("3701"), Some(3701.0));
        assert_eq!(coerce_numeric(" 97.4 "), Some(97.4));
        assert_eq!(coerce_numeric("na"), None);
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("NaN"), None);
        assert_eq!(coerce_numeric("1,200"), None);
        assert_eq!(coerce_numeric("inf"), Some(f64::INFINITY));
    }

    #[test]
    fn coerce_year_accepts_float_form() {
        assert_eq!(coerce_year("2019"), Some(2019));
        assert_eq!(coerce_year("2019.0"), Some(2019));
        assert_eq!(coerce_year("2019.5"), None);
        assert_eq!(coerce_year("twenty"), None);
    }

    #[test]
    fn metric_names_round_trip() {
        for m in Metric::ALL {
            assert_eq!(m.column().parse::<Metric>().unwrap(), m);
            assert_eq!(
                serde_json::to_string(&m).unwrap(),
                format!("\"{}\"", m.column())
            );
        }
        assert!("salary".parse::<Metric>().is_err());
    }

    #[test]
    fn assign_reports_coerced_cells() {
        let mut rec = SurveyRecord::default();
        assert!(rec.assign("gross_monthly_median", "na"));
        assert!(!rec.assign("gross_monthly_mean", ""));
        assert!(!rec.assign("basic_monthly_mean", "3200"));
        assert!(!rec.assign("some_extra_column", "whatever"));
        assert_eq!(rec.metric(Metric::GrossMonthlyMedian), None);
        assert_eq!(rec.metric(Metric::BasicMonthlyMean), Some(3200.0));
    }

    #[test]
    fn id_columns_follow_header() {
        let ds = SurveyDataset::new(
            vec!["degree".into(), "year".into(), "gross_monthly_median".into()],
            vec![],
        );
        assert_eq!(ds.id_columns(), vec![IdColumn::Year, IdColumn::Degree]);
    }
}
