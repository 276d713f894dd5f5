//! Plain-text traffic report

use std::io::{self, Write};
use webstat_analytics::{CountEntry, RateEntry, ShareEntry, TrafficSummary};

pub const SUMMARY_HEADER: &str = "===== 📊 OVERALL SUMMARY =====";
pub const SUMMARY_FOOTER: &str = "=================================";
pub const BOUNCE_BY_SOURCE_HEADER: &str = "🔎 Bounce Rate by Source:";
pub const CONVERSION_BY_DEVICE_HEADER: &str = "🧠 Conversion Rate by Device:";
pub const DEVICE_SHARE_HEADER: &str = "📱 Device Traffic Share:";
pub const TOP_PAGES_HEADER: &str = "📋 Top Visited Pages:";
pub const PEAK_HOURS_HEADER: &str = "⏰ Peak Traffic Hour:";

/// Write the report sections in their fixed order
pub fn write_report<W: Write>(out: &mut W, summary: &TrafficSummary) -> io::Result<()> {
    write_overview(out, summary)?;

    writeln!(out, "{BOUNCE_BY_SOURCE_HEADER}")?;
    write_rates(out, "source", &summary.bounce_by_source)?;

    writeln!(out, "{CONVERSION_BY_DEVICE_HEADER}")?;
    write_rates(out, "device", &summary.conversion_by_device)?;

    writeln!(out, "{DEVICE_SHARE_HEADER}")?;
    write_shares(out, "device", &summary.device_share)?;

    writeln!(out, "{TOP_PAGES_HEADER}")?;
    write_counts(out, "page", &summary.top_pages)?;

    writeln!(out, "{PEAK_HOURS_HEADER}")?;
    write_counts(out, "hour", &summary.peak_hours)?;

    Ok(())
}

/// Render the report into a string
pub fn render_report(summary: &TrafficSummary) -> io::Result<String> {
    let mut buf = Vec::new();
    write_report(&mut buf, summary)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_overview<W: Write>(out: &mut W, summary: &TrafficSummary) -> io::Result<()> {
    let o = &summary.overview;
    writeln!(out)?;
    writeln!(out, "{SUMMARY_HEADER}")?;
    writeln!(out, "Total Sessions        : {}", o.total_sessions)?;
    writeln!(
        out,
        "Total Bounces         : {} ({}%)",
        o.total_bounces,
        format_decimal(o.bounce_rate)
    )?;
    writeln!(
        out,
        "Total Conversions     : {} ({}%)",
        o.total_conversions,
        format_decimal(o.conversion_rate)
    )?;
    writeln!(
        out,
        "Avg Session Duration  : {} seconds",
        format_decimal(webstat_analytics::round2(o.avg_duration))
    )?;
    writeln!(out, "{SUMMARY_FOOTER}")?;
    writeln!(out)
}

fn write_rates<W: Write>(out: &mut W, index: &str, entries: &[RateEntry]) -> io::Result<()> {
    let rows: Vec<(String, String)> = entries
        .iter()
        .map(|e| (e.label.clone(), format!("{:.2}", e.rate)))
        .collect();
    write_table(out, index, &rows)
}

fn write_shares<W: Write>(out: &mut W, index: &str, entries: &[ShareEntry]) -> io::Result<()> {
    let rows: Vec<(String, String)> = entries
        .iter()
        .map(|e| (e.label.clone(), format!("{:.2}", e.share)))
        .collect();
    write_table(out, index, &rows)
}

fn write_counts<W, K>(out: &mut W, index: &str, entries: &[CountEntry<K>]) -> io::Result<()>
where
    W: Write,
    K: ToString,
{
    let rows: Vec<(String, String)> = entries
        .iter()
        .map(|e| (e.key.to_string(), e.count.to_string()))
        .collect();
    write_table(out, index, &rows)
}

/// Index name, then labels left-aligned and values right-aligned, then a blank line
fn write_table<W: Write>(out: &mut W, index: &str, rows: &[(String, String)]) -> io::Result<()> {
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        .max(index.chars().count());
    let value_width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

    writeln!(out, "{index}")?;
    for (label, value) in rows {
        writeln!(out, "{label:<label_width$}    {value:>value_width$}")?;
    }
    writeln!(out)
}

/// Shortest decimal form, keeping one fractional digit on whole numbers (`25.0`, `33.33`)
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
