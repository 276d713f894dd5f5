//! Integration tests for webstat-analytics.
//!
//! These drive the load, derive and aggregate stages against real files.

use webstat_analytics::{derive_columns, SessionLoader, SummaryOptions, TrafficSummary};
use webstat_common::test_utils::{
    assert_approx_eq, csv_with_rows, init_test_logging, sample_csv, write_temp_csv,
};
use webstat_common::WebStatError;

#[test]
fn test_file_to_summary_pipeline() {
    init_test_logging();

    let file = write_temp_csv(&sample_csv());
    let table = SessionLoader::new().load(file.path()).expect("sample loads");
    let enriched = derive_columns(table);
    let summary = TrafficSummary::compute(&enriched, &SummaryOptions::default());

    assert_eq!(summary.overview.total_sessions, 8);
    assert_eq!(summary.overview.bounce_rate, 37.5);
    assert_eq!(summary.overview.conversion_rate, 25.0);
    assert_approx_eq(summary.overview.avg_duration, 150.0, 1e-9);

    let sources: Vec<(&str, f64)> = summary
        .bounce_by_source
        .iter()
        .map(|e| (e.label.as_str(), e.rate))
        .collect();
    assert_eq!(sources, vec![("organic", 0.0), ("ads", 33.33), ("google", 66.67)]);

    let hours: Vec<u32> = summary.peak_hours.iter().map(|h| h.key).collect();
    assert_eq!(hours, vec![9, 14, 20]);

    let funnel: Vec<u64> = summary.funnel.iter().map(|p| p.count).collect();
    assert_eq!(funnel, vec![2, 1, 1]);
}

#[test]
fn test_missing_file_is_file_error() {
    init_test_logging();

    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.csv");

    let err = SessionLoader::new().load(&missing).unwrap_err();
    match err {
        WebStatError::File { path, .. } => assert_eq!(path.as_deref(), Some(missing.as_path())),
        other => panic!("expected file error, got {other:?}"),
    }
}

#[test]
fn test_bad_row_reports_line_and_column() {
    let csv = csv_with_rows(&[
        "a,2024-01-01 10:00:00,google,desktop,/,0,0,10",
        "b,2024-01-01 11:00:00,google,desktop,/,maybe,0,10",
    ]);
    let file = write_temp_csv(&csv);

    let err = SessionLoader::new().load(file.path()).unwrap_err();
    match err {
        WebStatError::Parse { line, column, .. } => {
            assert_eq!(line, Some(3));
            assert_eq!(column.as_deref(), Some("bounce"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_semicolon_delimited_file() {
    let csv = "session_id;timestamp;source;device;page;bounce;conversion;duration\n\
               a;2024-01-01 10:00:00;ads;mobile;/cart;1;0;\n\
               b;2024-01-01 10:30:00;ads;mobile;/cart;0;1;60\n";
    let file = write_temp_csv(csv);

    let table = SessionLoader::new()
        .with_delimiter(b';')
        .load(file.path())
        .expect("semicolon file loads");
    let summary = TrafficSummary::compute(&derive_columns(table), &SummaryOptions::default());

    assert_eq!(summary.overview.total_sessions, 2);
    assert_approx_eq(summary.overview.avg_duration, 60.0, 1e-9);
    assert_eq!(summary.duration_histogram.iter().map(|b| b.count).sum::<u64>(), 1);
}

#[test]
fn test_header_only_file_is_empty_summary() {
    let file = write_temp_csv(&csv_with_rows(&[]));

    let table = SessionLoader::new().load(file.path()).expect("header-only loads");
    assert!(table.is_empty());

    let summary = TrafficSummary::compute(&derive_columns(table), &SummaryOptions::default());
    assert_eq!(summary.overview.bounce_rate, 0.0);
    assert_eq!(summary.overview.conversion_rate, 0.0);
    assert_eq!(summary.overview.avg_duration, 0.0);
}
