//! End-to-end tests for the webstat pipeline.

use webstat::Pipeline;
use webstat_charts::{ChartRenderer, ChartSpec, NoopRenderer};
use webstat_common::test_utils::{csv_with_rows, init_test_logging, sample_csv, write_temp_csv};
use webstat_common::{Result, WebStatError};
use webstat_config::Config;

fn config_for(path: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.input.path = path.display().to_string();
    config.charts.enabled = false;
    config
}

struct FailingRenderer(&'static str);

impl ChartRenderer for FailingRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<()> {
        if spec.stem == self.0 {
            Err(WebStatError::render_chart("no drawing backend", spec.stem))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

#[test]
fn test_report_for_sample_log() {
    init_test_logging();

    let file = write_temp_csv(&sample_csv());
    let mut out: Vec<u8> = Vec::new();
    let outcome = Pipeline::new(config_for(file.path()))
        .run(&mut out)
        .expect("run succeeds");
    let text = String::from_utf8(out).unwrap();

    assert_eq!(outcome.charts_rendered, 9);
    assert!(text.contains("Total Sessions        : 8\n"));
    assert!(text.contains("Total Bounces         : 3 (37.5%)\n"));
    assert!(text.contains("Total Conversions     : 2 (25.0%)\n"));
    assert!(text.contains("Avg Session Duration  : 150.0 seconds\n"));
    assert!(text.contains("🔎 Bounce Rate by Source:\nsource\norganic     0.00\nads        33.33\ngoogle     66.67\n"));
    assert!(text.contains("📱 Device Traffic Share:\ndevice\ndesktop    50.00\nmobile     37.50\ntablet     12.50\n"));
    assert!(text.contains("⏰ Peak Traffic Hour:\nhour\n9       3\n14      2\n20      2\n"));
}

#[test]
fn test_two_source_scenario() {
    let csv = csv_with_rows(&[
        "a,2024-01-01 10:00:00,ads,desktop,/,1,0,10",
        "b,2024-01-01 10:05:00,ads,desktop,/,0,0,10",
        "c,2024-01-01 10:10:00,organic,desktop,/,0,0,10",
        "d,2024-01-01 10:15:00,organic,desktop,/,0,0,10",
    ]);
    let file = write_temp_csv(&csv);

    let outcome = Pipeline::new(config_for(file.path()))
        .run_with(&mut Vec::<u8>::new(), &NoopRenderer)
        .unwrap();

    assert_eq!(outcome.summary.overview.bounce_rate, 25.0);
    let rates: Vec<(&str, f64)> = outcome
        .summary
        .bounce_by_source
        .iter()
        .map(|e| (e.label.as_str(), e.rate))
        .collect();
    assert_eq!(rates, vec![("organic", 0.0), ("ads", 50.0)]);
}

#[test]
fn test_chart_failure_after_report() {
    let file = write_temp_csv(&sample_csv());
    let mut out: Vec<u8> = Vec::new();

    let err = Pipeline::new(config_for(file.path()))
        .run_with(&mut out, &FailingRenderer("funnel_dropoff"))
        .unwrap_err();

    assert_eq!(err.kind(), "render");
    assert!(err.to_string().contains("funnel_dropoff"));
    // The text report was already written
    assert!(String::from_utf8(out).unwrap().contains("===== 📊 OVERALL SUMMARY ====="));
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut out: Vec<u8> = Vec::new();

    let err = Pipeline::new(config_for(&dir.path().join("web_traffic.csv")))
        .run(&mut out)
        .unwrap_err();

    assert!(matches!(err, WebStatError::File { .. }));
    assert!(out.is_empty());
}

#[test]
fn test_bad_timestamp_is_parse_error() {
    let file = write_temp_csv(&csv_with_rows(&["a,yesterday,ads,desktop,/,0,0,1"]));

    let err = Pipeline::new(config_for(file.path()))
        .run(&mut Vec::<u8>::new())
        .unwrap_err();

    assert!(matches!(err, WebStatError::Parse { line: Some(2), .. }));
}

#[test]
fn test_unwritable_chart_directory_is_file_error() {
    let input = write_temp_csv(&sample_csv());
    let blocker = tempfile::NamedTempFile::new().unwrap();

    let mut config = config_for(input.path());
    config.charts.enabled = true;
    config.charts.output_dir = blocker.path().display().to_string();

    let err = Pipeline::new(config).run(&mut Vec::<u8>::new()).unwrap_err();
    assert_eq!(err.kind(), "file");
}

#[test]
fn test_custom_delimiter_and_funnel() {
    let csv = "session_id|timestamp|source|device|page|bounce|conversion|duration\n\
               a|01/03/2024 10:00|ads|mobile|/signup|0|1|30\n\
               b|01/03/2024 11:00|ads|mobile|/home|1|0|5\n";
    let file = write_temp_csv(csv);

    let mut config = config_for(file.path());
    config.input.delimiter = "|".to_string();
    config.input.timestamp_format = Some("%d/%m/%Y %H:%M".to_string());
    config.report.funnel_pages = vec!["/home".to_string(), "/signup".to_string(), "/done".to_string()];

    let outcome = Pipeline::new(config).run(&mut Vec::<u8>::new()).unwrap();
    let funnel: Vec<u64> = outcome.summary.funnel.iter().map(|p| p.count).collect();

    assert_eq!(funnel, vec![1, 1, 0]);
    assert_eq!(outcome.summary.peak_hours[0].key, 10);
}
