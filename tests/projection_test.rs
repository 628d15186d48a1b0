//! Salary projection behaviour on in-memory tables

use gradpay::analysis::stats::LinearFit;
use gradpay::analysis::{project_salaries, projection_rows, ProjectionParams};
use gradpay::data::loader::read_csv;
use gradpay::data::model::{Metric, SurveyDataset, SurveyRecord};

fn cohort(degree: &str, university: &str, series: &[(i32, f64)]) -> Vec<SurveyRecord> {
    series
        .iter()
        .map(|&(year, salary)| {
            SurveyRecord::new(year, university, "School", degree)
                .with_metric(Metric::GrossMonthlyMedian, salary)
        })
        .collect()
}

#[test]
fn perfectly_linear_series_projects_exactly() {
    let ds = SurveyDataset::from_records(cohort(
        "Computer Science",
        "NUS",
        &[(2019, 1000.0), (2020, 1100.0), (2021, 1200.0), (2022, 1300.0), (2023, 1400.0)],
    ));

    let projections = project_salaries(&ds, &ProjectionParams::default()).unwrap();
    let rows = projection_rows(&projections);
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.degree, "Computer Science");
    assert_eq!(row.university, "NUS");
    assert_eq!(row.method, "Linear Trend (last 5 years: 2019-2023)");
    assert_eq!(row.last_year, 2023);
    assert_eq!(row.last_actual_median, 1400.0);
    assert_eq!(row.forecast_year, 2024);
    assert_eq!(row.predicted_median, 1500.0);
    assert_eq!(row.trend_slope, 100.0);
    assert_eq!(row.change_amount, 100.0);
    assert_eq!(row.change_percentage, 7.14);
    assert_eq!(row.years_used, 5);
    assert_eq!(row.data_range, "2019-2023");
}

#[test]
fn short_groups_are_skipped_and_two_points_give_exact_line() {
    let mut records = cohort("Law", "SMU", &[(2023, 5000.0)]);
    records.extend(cohort("Arts", "NTU", &[(2022, 3000.0), (2023, 3200.0)]));
    let mut no_salary = SurveyRecord::new(2023, "SUTD", "Pillar", "Design");
    no_salary.set_metric(Metric::GrossMonthlyMedian, None);
    records.push(no_salary);

    let ds = SurveyDataset::from_records(records);
    let projections = project_salaries(&ds, &ProjectionParams::default()).unwrap();

    assert_eq!(projections.len(), 1);
    let p = &projections[0];
    assert_eq!((p.degree.as_str(), p.university.as_str()), ("Arts", "NTU"));
    assert!((p.predicted - 3400.0).abs() < 1e-6);
    assert!((p.trend_slope - 200.0).abs() < 1e-9);
    assert_eq!(p.years_used, 2);
}

#[test]
fn output_is_sorted_by_prediction_descending() {
    let mut records = Vec::new();
    records.extend(cohort("A", "U1", &[(2021, 3000.0), (2022, 3100.0), (2023, 3150.0)]));
    records.extend(cohort("B", "U1", &[(2021, 5000.0), (2022, 4800.0), (2023, 4700.0)]));
    records.extend(cohort("C", "U2", &[(2021, 2000.0), (2022, 2600.0), (2023, 3300.0)]));
    records.extend(cohort("D", "U2", &[(2022, 4000.0), (2023, 4000.0)]));

    let ds = SurveyDataset::from_records(records);
    let projections = project_salaries(&ds, &ProjectionParams::default()).unwrap();

    assert_eq!(projections.len(), 4);
    assert!(projections
        .windows(2)
        .all(|w| w[0].predicted >= w[1].predicted));
    assert_eq!(projections[0].degree, "B");
}

#[test]
fn derived_fields_use_unrounded_values() {
    // last actual 1099.996 shows as 1100.00, prediction 1133.334 as 1133.33
    let ds = SurveyDataset::from_records(cohort(
        "Maths",
        "NUS",
        &[(2022, 1066.658), (2023, 1099.996)],
    ));
    let projections = project_salaries(&ds, &ProjectionParams::default()).unwrap();
    let row = projection_rows(&projections).remove(0);

    assert_eq!(row.last_actual_median, 1100.0);
    assert_eq!(row.predicted_median, 1133.33);
    assert_eq!(row.change_amount, 33.34);
    assert_eq!(row.change_percentage, 3.03);
    assert!((row.predicted_median - row.last_actual_median - row.change_amount).abs() > 0.005);
}

#[test]
fn fit_minimises_residuals() {
    let series = [(2019, 3100.0), (2020, 3350.0), (2021, 3200.0), (2022, 3600.0), (2023, 3550.0)];
    let points: Vec<(f64, f64)> = series.iter().map(|&(y, s)| (y as f64, s)).collect();
    let best = LinearFit::fit(&points).unwrap();
    let best_rss = best.rss(&points);

    for (di, ds) in [(5.0, 0.0), (-5.0, 0.0), (0.0, 0.5), (0.0, -0.5), (3.0, -0.1)] {
        let other = LinearFit {
            intercept: best.intercept + di,
            slope: best.slope + ds,
        };
        assert!(other.rss(&points) >= best_rss);
    }

    let ds = SurveyDataset::from_records(cohort("Econ", "SMU", &series));
    let p = &project_salaries(&ds, &ProjectionParams::default()).unwrap()[0];
    assert!((p.predicted - best.predict(2024.0)).abs() < 1e-6);
}

#[test]
fn malformed_salary_text_never_fails_the_run() {
    let csv = "\
year,university,school,degree,gross_monthly_median
2021,NUS,SoC,CS,4000
2022,NUS,SoC,CS,not reported
2023,NUS,SoC,CS,4400
2022,SMU,Law,Law,na
2023,SMU,Law,Law,5100
";
    let ds = read_csv(csv.as_bytes()).unwrap();
    let projections = project_salaries(&ds, &ProjectionParams::default()).unwrap();

    assert_eq!(projections.len(), 1);
    assert_eq!(projections[0].university, "NUS");
    assert_eq!(projections[0].years_used, 2);
    assert!((projections[0].predicted - 4600.0).abs() < 1e-6);
}

#[test]
fn repeated_runs_are_identical() {
    let mut records = cohort("A", "U1", &[(2020, 3000.0), (2021, 3170.5), (2023, 3333.3)]);
    records.extend(cohort("B", "U2", &[(2019, 4100.0), (2023, 4800.0)]));
    let ds = SurveyDataset::from_records(records);

    let first = project_salaries(&ds, &ProjectionParams::default()).unwrap();
    let second = project_salaries(&ds, &ProjectionParams::default()).unwrap();
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.predicted.to_bits(), b.predicted.to_bits());
        assert_eq!(a.change_percentage.to_bits(), b.change_percentage.to_bits());
    }
}
