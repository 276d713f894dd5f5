//! Test utilities and shared fixtures for the webstat workspace.
//!
//! Enabled for this crate's own tests and, through the `testing` feature, for
//! the dev-dependencies of the other crates.

use chrono::{NaiveDate, NaiveDateTime};
use std::io::Write;
use std::sync::Once;

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Header row shared by the CSV fixtures.
pub const SESSION_HEADER: &str = "session_id,timestamp,source,device,page,bounce,conversion,duration";

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Test fixture for creating a naive timestamp.
pub fn mock_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .expect("valid fixture timestamp")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// A small, hand-checked session log.
///
/// 8 sessions over two days; 3 bounces, 2 conversions, durations sum to 1200.
pub fn sample_csv() -> String {
    let rows = [
        "s1,2024-03-01 09:15:00,google,desktop,/home,0,0,120",
        "s2,2024-03-01 09:40:00,google,mobile,/cart,1,0,30",
        "s3,2024-03-01 14:05:00,ads,mobile,/checkout,0,1,300",
        "s4,2024-03-01 14:30:00,ads,tablet,/home,1,0,15",
        "s5,2024-03-02 09:05:00,organic,desktop,/cart,0,0,200",
        "s6,2024-03-02 20:45:00,organic,desktop,/thankyou,0,1,400",
        "s7,2024-03-02 20:50:00,google,mobile,/home,1,0,35",
        "s8,2024-03-02 21:10:00,ads,desktop,/blog,0,0,100",
    ];
    let mut out = String::from(SESSION_HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out.push('\n');
    out
}

/// Write `contents` to a fresh temporary file and return its handle.
#[cfg(feature = "tempfile")]
pub fn write_temp_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temporary file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temporary file");
    file
}

/// Build a CSV document from `rows` under the standard header.
pub fn csv_with_rows(rows: &[&str]) -> String {
    let mut out = Vec::new();
    writeln!(out, "{SESSION_HEADER}").expect("write to Vec");
    for row in rows {
        writeln!(out, "{row}").expect("write to Vec");
    }
    String::from_utf8(out).expect("fixture is UTF-8")
}
