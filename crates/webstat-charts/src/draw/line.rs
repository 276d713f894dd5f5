//! Sessions-per-day line chart

use super::{axis_max, label_font, title_font};
use crate::types::{ChartSpec, RenderOptions};
use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use webstat_common::Result;

pub(super) fn draw<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    options: &RenderOptions,
    points: &[(NaiveDate, f64)],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let Some(&(origin, _)) = points.first() else {
        return Ok(());
    };
    let series: Vec<(f64, f64)> = points
        .iter()
        .map(|(date, count)| (day_offset(origin, *date), *count))
        .collect();

    // A single day still gets a visible span
    let span = series.last().map_or(0.0, |p| p.0).max(1.0);
    let y_max = axis_max(series.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, title_font(options))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.05 * span..span * 1.05, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(points.len().clamp(2, 10))
        .x_label_formatter(&|x| date_label(origin, *x))
        .x_desc(spec.x_label.as_deref().unwrap_or(""))
        .y_desc(spec.y_label.as_deref().unwrap_or(""))
        .label_style(label_font(options))
        .draw()?;

    let color = spec.style.primary();
    chart.draw_series(LineSeries::new(series.iter().copied(), color.stroke_width(2)))?;
    chart.draw_series(
        series
            .iter()
            .map(|point| Circle::new(*point, 3, color.filled())),
    )?;

    Ok(())
}

fn day_offset(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

/// Tick label for a fractional day offset; ticks between days stay blank
fn date_label(origin: NaiveDate, offset: f64) -> String {
    let rounded = offset.round();
    if (offset - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    (origin + Duration::days(rounded as i64))
        .format("%Y-%m-%d")
        .to_string()
}
