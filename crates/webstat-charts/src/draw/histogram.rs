//! Session duration histogram

use super::{axis_max, label_font, title_font};
use crate::types::{ChartSpec, RenderOptions};
use plotters::coord::Shift;
use plotters::prelude::*;
use webstat_analytics::HistogramBin;
use webstat_common::Result;

pub(super) fn draw<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    options: &RenderOptions,
    bins: &[HistogramBin],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x_min, x_max) = x_range(bins);
    let y_max = axis_max(bins.iter().map(|b| b.count as f64));

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, title_font(options))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(spec.x_label.as_deref().unwrap_or(""))
        .y_desc(spec.y_label.as_deref().unwrap_or(""))
        .label_style(label_font(options))
        .draw()?;

    let fill = spec.style.primary();
    chart.draw_series(
        bins.iter()
            .map(|b| Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], fill.filled())),
    )?;
    if let Some(edge) = spec.style.edge {
        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], edge.stroke_width(1))
        }))?;
    }

    Ok(())
}

/// Span of the bins; bins are contiguous and ordered
fn x_range(bins: &[HistogramBin]) -> (f64, f64) {
    match (bins.first(), bins.last()) {
        (Some(first), Some(last)) if last.upper > first.lower => (first.lower, last.upper),
        (Some(first), _) => (first.lower - 0.5, first.lower + 0.5),
        _ => (0.0, 1.0),
    }
}
