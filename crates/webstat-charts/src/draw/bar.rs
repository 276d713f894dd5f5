//! Categorical bar charts, vertical and horizontal

use super::{axis_max, label_font, last_index, segment_label, title_font};
use crate::types::{ChartSpec, RenderOptions};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use webstat_common::Result;

pub(super) fn draw_vertical<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    options: &RenderOptions,
    labels: &[String],
    values: &[f64],
    rotate_labels: bool,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let y_max = axis_max(values.iter().copied());
    // Rotated page paths need room below the axis
    let x_label_area = if rotate_labels { 110 } else { 40 };

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, title_font(options))
        .margin(15)
        .x_label_area_size(x_label_area)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..last_index(labels.len())).into_segmented(), 0f64..y_max)?;

    let x_label_style = if rotate_labels {
        label_font(options).transform(FontTransform::Rotate90)
    } else {
        label_font(options)
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_style(x_label_style)
        .x_label_formatter(&|v| segment_label(labels, v))
        .x_desc(spec.x_label.as_deref().unwrap_or(""))
        .y_desc(spec.y_label.as_deref().unwrap_or(""))
        .label_style(label_font(options))
        .draw()?;

    let bars = values.iter().enumerate().map(|(i, v)| (i as u32, *v));
    chart.draw_series(
        Histogram::vertical(&chart)
            .style(spec.style.primary().filled())
            .margin(8)
            .data(bars.clone()),
    )?;
    if let Some(edge) = spec.style.edge {
        chart.draw_series(
            Histogram::vertical(&chart)
                .style(edge.stroke_width(1))
                .margin(8)
                .data(bars),
        )?;
    }

    Ok(())
}

pub(super) fn draw_horizontal<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    options: &RenderOptions,
    labels: &[String],
    values: &[f64],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let x_max = axis_max(values.iter().copied());
    let widest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, title_font(options))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size((widest * options.label_font_size * 6 / 10).clamp(60, 240))
        .build_cartesian_2d(0f64..x_max, (0u32..last_index(labels.len())).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(labels.len())
        .y_label_formatter(&|v| segment_label(labels, v))
        .x_desc(spec.x_label.as_deref().unwrap_or(""))
        .y_desc(spec.y_label.as_deref().unwrap_or(""))
        .label_style(label_font(options))
        .draw()?;

    chart.draw_series(
        Histogram::horizontal(&chart)
            .style(spec.style.primary().filled())
            .margin(6)
            .data(values.iter().enumerate().map(|(i, v)| (i as u32, *v))),
    )?;

    Ok(())
}
