//! Property-based tests for the projection and relationship core
//!
//! - Ranking, window and fit invariants over random cohorts
//! - Coercion never fails on arbitrary cell text
//! - Run with ProptestConfig::with_cases(100)

use gradpay::analysis::stats::{pearson, LinearFit};
use gradpay::analysis::{analyze_relationships, project_salaries, ProjectionParams};
use gradpay::data::model::{coerce_numeric, Metric, SurveyDataset, SurveyRecord};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Random survey rows: a handful of cohorts, distinct years per cohort,
/// salaries sometimes missing.
fn arb_dataset() -> impl Strategy<Value = SurveyDataset> {
    proptest::collection::vec(
        (
            0usize..4,
            0usize..3,
            proptest::collection::btree_map(2010i32..2024, proptest::option::weighted(0.85, 1500.0f64..9000.0), 0..10),
        ),
        0..8,
    )
    .prop_map(|cohorts| {
        let mut records = Vec::new();
        let mut seen = std::collections::BTreeSet::new();
        for (degree, university, series) in cohorts {
            if !seen.insert((degree, university)) {
                continue;
            }
            for (year, salary) in series {
                let mut rec = SurveyRecord::new(
                    year,
                    &format!("U{university}"),
                    "School",
                    &format!("D{degree}"),
                );
                rec.set_metric(Metric::GrossMonthlyMedian, salary);
                rec.set_metric(Metric::EmploymentRateOverall, salary.map(|s| 60.0 + s / 300.0));
                records.push(rec);
            }
        }
        SurveyDataset::from_records(records)
    })
}

fn arb_points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    proptest::collection::btree_map(2000i32..2030, 1000.0f64..10000.0, 2..8)
        .prop_map(|m| m.into_iter().map(|(x, y)| (x as f64, y)).collect())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: projections are ranked by predicted value, descending
    #[test]
    fn prop_projections_sorted_descending(ds in arb_dataset()) {
        let projections = project_salaries(&ds, &ProjectionParams::default()).unwrap();
        for w in projections.windows(2) {
            prop_assert!(w[0].predicted >= w[1].predicted);
        }
    }

    /// Property: every emitted cohort used between 2 and window rows
    #[test]
    fn prop_years_used_within_window(ds in arb_dataset(), window in 2usize..7) {
        let params = ProjectionParams { trailing_window: window, ..ProjectionParams::default() };
        for p in project_salaries(&ds, &params).unwrap() {
            prop_assert!(p.years_used >= 2 && p.years_used <= window);
            prop_assert!(p.first_year < p.last_year);
        }
    }

    /// Property: same input, bit-identical output
    #[test]
    fn prop_projection_idempotent(ds in arb_dataset()) {
        let a = project_salaries(&ds, &ProjectionParams::default()).unwrap();
        let b = project_salaries(&ds, &ProjectionParams::default()).unwrap();
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            prop_assert_eq!(x.predicted.to_bits(), y.predicted.to_bits());
            prop_assert_eq!(&x.degree, &y.degree);
            prop_assert_eq!(&x.university, &y.university);
        }
    }

    /// Property: no line has a smaller residual sum of squares than the fit
    #[test]
    fn prop_fit_is_least_squares(
        points in arb_points(),
        d_intercept in -50.0f64..50.0,
        d_slope in -5.0f64..5.0,
    ) {
        let fit = LinearFit::fit(&points).unwrap();
        let other = LinearFit { intercept: fit.intercept + d_intercept, slope: fit.slope + d_slope };
        let tolerance = 1e-6 * fit.rss(&points).max(1.0);
        prop_assert!(other.rss(&points) + tolerance >= fit.rss(&points));
    }

    /// Property: Pearson r is in [-1, 1] or undefined
    #[test]
    fn prop_pearson_bounded(points in arb_points()) {
        let r = pearson(&points);
        prop_assert!(r.is_nan() || (-1.0..=1.0).contains(&r));
    }

    /// Property: relationship n counts rows with both metrics present
    #[test]
    fn prop_relationship_counts_paired_rows(ds in arb_dataset()) {
        let report = analyze_relationships(&ds, Metric::GrossMonthlyMedian).unwrap();
        let paired = ds
            .records
            .iter()
            .filter(|r| r.metric(Metric::EmploymentRateOverall).is_some()
                && r.metric(Metric::GrossMonthlyMedian).is_some())
            .count();
        prop_assert_eq!(report.summary[0].n, paired);
        prop_assert_eq!(report.summary[1].n, 0);
        prop_assert_eq!(report.summary[0].pearson_r.is_nan(), paired < 2);
    }

    /// Property: coercion never panics and never yields NaN
    #[test]
    fn prop_coercion_total(text in ".{0,12}") {
        if let Some(v) = coerce_numeric(&text) {
            prop_assert!(!v.is_nan());
        }
    }
}
