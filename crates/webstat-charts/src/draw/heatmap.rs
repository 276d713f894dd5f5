//! Hour-by-source heatmap on the YlGnBu scale

use super::{label_font, last_index, segment_label, title_font};
use crate::colors::ylgnbu;
use crate::types::{ChartSpec, RenderOptions};
use plotters::coord::Shift;
use plotters::prelude::*;
use webstat_analytics::HourSourceMatrix;
use webstat_common::Result;

const COLOR_BAR_WIDTH: u32 = 90;
const COLOR_BAR_STEPS: usize = 64;

pub(super) fn draw<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    options: &RenderOptions,
    matrix: &HourSourceMatrix,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let body = root.titled(&spec.title, title_font(options))?;
    let (width, _) = body.dim_in_pixel();
    let (grid_area, bar_area) = body.split_horizontally(width.saturating_sub(COLOR_BAR_WIDTH));

    let n_rows = matrix.hours.len();
    let n_cols = matrix.sources.len();
    // First hour on the top row
    let row_labels: Vec<String> = matrix.hours.iter().rev().map(|h| h.to_string()).collect();
    let max = matrix.max().max(1) as f64;

    let mut chart = ChartBuilder::on(&grid_area)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (0u32..last_index(n_cols)).into_segmented(),
            (0u32..last_index(n_rows)).into_segmented(),
        )?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n_cols)
        .y_labels(n_rows)
        .x_label_formatter(&|v| segment_label(&matrix.sources, v))
        .y_label_formatter(&|v| segment_label(&row_labels, v))
        .x_desc(spec.x_label.as_deref().unwrap_or(""))
        .y_desc(spec.y_label.as_deref().unwrap_or(""))
        .label_style(label_font(options))
        .draw()?;

    let cells = matrix.counts.iter().enumerate().flat_map(|(r, row)| {
        let y = (n_rows - 1 - r) as u32;
        row.iter().enumerate().map(move |(c, count)| {
            let x = c as u32;
            Rectangle::new(
                [
                    (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                    (upper_edge(x, n_cols), upper_edge(y, n_rows)),
                ],
                ylgnbu(*count as f64 / max).filled(),
            )
        })
    });
    chart.draw_series(cells)?;

    draw_color_bar(&bar_area, options, max)
}

/// Right edge of segment `i` on an axis with `n` segments
fn upper_edge(i: u32, n: usize) -> SegmentValue<u32> {
    if (i as usize) + 1 >= n {
        SegmentValue::Last
    } else {
        SegmentValue::Exact(i + 1)
    }
}

/// Vertical legend mapping colours back to counts
fn draw_color_bar<DB>(area: &DrawingArea<DB, Shift>, options: &RenderOptions, max: f64) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut bar = ChartBuilder::on(area)
        .margin_top(15)
        .margin_bottom(55)
        .margin_right(15)
        .y_label_area_size(40)
        .build_cartesian_2d(0f64..1.0, 0f64..max)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_label_formatter(&|v| format!("{v:.0}"))
        .label_style(label_font(options))
        .draw()?;

    let step = max / COLOR_BAR_STEPS as f64;
    bar.draw_series((0..COLOR_BAR_STEPS).map(|i| {
        let lower = step * i as f64;
        Rectangle::new(
            [(0.0, lower), (1.0, lower + step)],
            ylgnbu((i as f64 + 0.5) / COLOR_BAR_STEPS as f64).filled(),
        )
    }))?;

    Ok(())
}
