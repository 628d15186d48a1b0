//! Headless run: project salaries, analyse relationships, write all tables.
//!
//! Usage: `survey-report [config.json]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use gradpay::analysis::{analyze_relationships, project_salaries, projection_rows};
use gradpay::config::AnalysisConfig;
use gradpay::data::loader::load_file;
use gradpay::report;

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => AnalysisConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let dataset = load_file(&config.input_path)?;

    let projections = project_salaries(&dataset, &config.projection_params())?;
    let rows = projection_rows(&projections);
    report::write_projections(&config.output_dir, &rows)?;

    let relationships = analyze_relationships(&dataset, config.salary_metric)?;
    report::write_relationship_report(&config.output_dir, &relationships)?;

    println!(
        "Projection analysis completed for {} degree-university combinations",
        rows.len()
    );
    println!("\nTop projected {} for {}:", config.salary_metric, config.forecast_year);
    for row in rows.iter().take(10) {
        println!(
            "  {:<50} {:<45} {:>10.2} {:>8.2}%",
            row.degree, row.university, row.predicted_median, row.change_percentage
        );
    }

    println!("\nRelationships:");
    for s in &relationships.summary {
        println!(
            "  {:<36} r = {:>7.4}  n = {}",
            s.relationship_name, s.pearson_r, s.n
        );
    }

    Ok(())
}
