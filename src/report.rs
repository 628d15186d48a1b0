//! Writing result tables as delimited text.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::{PairFrame, ProjectionRow, RelationshipReport, RelationshipSummary};

pub const PROJECTIONS_FILE: &str = "salary_projections.csv";
pub const SUMMARY_FILE: &str = "relationship_summary.csv";

/// Write projection rows in the order given.
pub fn write_projection_rows<W: Write>(out: W, rows: &[ProjectionRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    if rows.is_empty() {
        writer.write_record(ProjectionRow::COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row).context("serializing projection row")?;
    }
    writer.flush()?;
    Ok(())
}

/// One pair-frame cell; numbers go through the same serializer as the
/// projection rows.
#[derive(Serialize)]
#[serde(untagged)]
enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

pub fn write_pair_frame<W: Write>(out: W, frame: &PairFrame) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(frame.header())?;
    for row in &frame.rows {
        let cells: Vec<Cell> = row
            .ids
            .iter()
            .map(|id| Cell::Text(id.as_str()))
            .chain([Cell::Number(row.x), Cell::Number(row.y)])
            .collect();
        writer.serialize(cells).context("serializing pair row")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_summary<W: Write>(out: W, summary: &[RelationshipSummary]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in summary {
        writer.serialize(row).context("serializing summary row")?;
    }
    writer.flush()?;
    Ok(())
}

fn create(dir: &Path, name: &str) -> Result<(PathBuf, std::fs::File)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let path = dir.join(name);
    let file = std::fs::File::create(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    Ok((path, file))
}

/// Write `salary_projections.csv` into `dir`.
pub fn write_projections(dir: &Path, rows: &[ProjectionRow]) -> Result<PathBuf> {
    let (path, file) = create(dir, PROJECTIONS_FILE)?;
    write_projection_rows(file, rows).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {} projections to {}", rows.len(), path.display());
    Ok(path)
}

/// Write both aligned frames and the summary into `dir`.
pub fn write_relationship_report(dir: &Path, report: &RelationshipReport) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(report.frames.len() + 1);

    for frame in &report.frames {
        let (path, file) = create(dir, &format!("{}.csv", frame.pair.file_stem))?;
        write_pair_frame(file, frame).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }

    let (path, file) = create(dir, SUMMARY_FILE)?;
    write_summary(file, &report.summary).with_context(|| format!("writing {}", path.display()))?;
    written.push(path);

    log::info!("Wrote relationship tables to {}", dir.display());
    Ok(written)
}
