use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{SurveyDataset, SurveyRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the cleaned survey table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one survey row per line (recommended)
/// * `.json`    – `[{ "year": 2019, "university": "...", ... }, ...]`
/// * `.parquet` – flat table with the same column names
pub fn load_file(path: &Path) -> Result<SurveyDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} survey rows ({} columns) from {}",
        dataset.len(),
        dataset.columns.len(),
        path.display()
    );
    Ok(dataset)
}

/// Counts cells that were present but had to be coerced to missing.
#[derive(Default)]
struct CoercionTally {
    cells: usize,
    rows: usize,
}

impl CoercionTally {
    fn row(&mut self, coerced: usize) {
        if coerced > 0 {
            self.cells += coerced;
            self.rows += 1;
        }
    }

    fn report(&self, source: &str) {
        if self.cells > 0 {
            log::warn!(
                "{source}: {} malformed cells in {} rows treated as missing",
                self.cells,
                self.rows
            );
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a cleaned table from any CSV reader. Extra columns are ignored;
/// cells missing from a short row stay missing.
pub fn read_csv<R: std::io::Read>(rdr: R) -> Result<SurveyDataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    let mut tally = CoercionTally::default();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {}", row_no + 1))?;

        let mut record = SurveyRecord::default();
        let coerced = headers
            .iter()
            .zip(row.iter())
            .filter(|(col, value)| record.assign(col, value))
            .count();
        tally.row(coerced);
        records.push(record);
    }

    tally.report("CSV");
    Ok(SurveyDataset::new(headers, records))
}

fn load_csv(path: &Path) -> Result<SurveyDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "year": 2019, "university": "Nanyang Technological University",
///     "degree": "Accountancy", "gross_monthly_median": 3500, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<SurveyDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Parse records-oriented JSON text into a dataset.
pub fn parse_json(text: &str) -> Result<SurveyDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());
    let mut tally = CoercionTally::default();

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut record = SurveyRecord::default();
        let mut coerced = 0;
        for (key, val) in obj {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
            if record.assign(key, &json_cell_text(val)) {
                coerced += 1;
            }
        }
        tally.row(coerced);
        records.push(record);
    }

    tally.report("JSON");
    Ok(SurveyDataset::new(columns, records))
}

fn json_cell_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the cleaned table.
///
/// Columns may be stored as strings or as native ints/floats; either way the
/// cell is coerced with the same rules as the CSV path.
fn load_parquet(path: &Path) -> Result<SurveyDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut tally = CoercionTally::default();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let mut record = SurveyRecord::default();
            let mut coerced = 0;
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let text = cell_text(batch.column(col_idx), row).unwrap_or_default();
                if record.assign(field.name(), &text) {
                    coerced += 1;
                }
            }
            tally.row(coerced);
            records.push(record);
        }
    }

    tally.report("Parquet");
    Ok(SurveyDataset::new(columns, records))
}

// -- Parquet / Arrow helpers --

/// Render a single Arrow cell as text. `None` for nulls and unsupported types.
fn cell_text(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => Some(any.downcast_ref::<StringArray>()?.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Some(any.downcast_ref::<Int32Array>()?.value(row).to_string()),
        DataType::Int64 => Some(any.downcast_ref::<Int64Array>()?.value(row).to_string()),
        DataType::Float32 => Some(any.downcast_ref::<Float32Array>()?.value(row).to_string()),
        DataType::Float64 => Some(any.downcast_ref::<Float64Array>()?.value(row).to_string()),
        DataType::Boolean => Some(any.downcast_ref::<BooleanArray>()?.value(row).to_string()),
        other => {
            log::debug!("ignoring parquet cell of type {other:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Metric;

    const SAMPLE: &str = "\
year,university,school,degree,employment_rate_overall,gross_monthly_median,notes
2019,NUS,School of Computing,Computer Science,95.1,4500,ok
2020,NUS,School of Computing,Computer Science,na,4700,
2021,NUS,School of Computing,Computer Science,96.0,,late
";

    #[test]
    fn csv_coerces_bad_cells_to_missing() {
        let ds = read_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert!(ds.has_column("notes"));
        assert_eq!(ds.records[1].metric(Metric::EmploymentRateOverall), None);
        assert_eq!(ds.records[1].metric(Metric::GrossMonthlyMedian), Some(4700.0));
        assert_eq!(ds.records[2].metric(Metric::GrossMonthlyMedian), None);
        assert_eq!(ds.records[0].degree.as_deref(), Some("Computer Science"));
        assert!(ds.universities.contains("NUS"));
    }

    #[test]
    fn csv_short_rows_leave_trailing_cells_missing() {
        let text = "\
year,university,school,degree,gross_monthly_median,employment_rate_overall
2022,NUS,SoC,CS,4000,90
2023,NUS,SoC,CS,4200
2024,NUS
";
        let ds = read_csv(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[1].metric(Metric::GrossMonthlyMedian), Some(4200.0));
        assert_eq!(ds.records[1].metric(Metric::EmploymentRateOverall), None);
        assert_eq!(ds.records[2].degree, None);
    }

    #[test]
    fn csv_errors_name_one_based_row() {
        let mut bytes = b"year,degree\n2022,Law\n2023,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let err = read_csv(bytes.as_slice()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 2"));
    }

    #[test]
    fn json_records_are_read() {
        let text = r#"[
            {"year": 2022, "university": "SMU", "degree": "Law", "gross_monthly_median": 5000},
            {"year": 2023.0, "university": "SMU", "degree": "Law", "gross_monthly_median": "na"}
        ]"#;
        let ds = parse_json(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].year, Some(2023));
        assert_eq!(ds.records[1].metric(Metric::GrossMonthlyMedian), None);
        assert!(!ds.has_column("school"));
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(parse_json(r#"{"year": 2022}"#).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("survey.xlsx")).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension"));
    }
}
