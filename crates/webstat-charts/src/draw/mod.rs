//! Backend-agnostic drawing of a [`ChartSpec`]
//!
//! Each submodule draws one chart kind onto any plotters `DrawingArea`, so the
//! bitmap renderer and any other backend share the same code.

mod bar;
mod heatmap;
mod histogram;
mod line;
mod pie;

use crate::types::{ChartData, ChartSpec, RenderOptions};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use webstat_common::Result;

/// Draw `spec` onto `root`, filling the background first
pub fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    options: &RenderOptions,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&options.background)?;

    if spec.data.is_empty() {
        return draw_placeholder(root, spec, options);
    }

    match &spec.data {
        ChartData::Bars {
            labels,
            values,
            rotate_labels,
        } => bar::draw_vertical(root, spec, options, labels, values, *rotate_labels),
        ChartData::HorizontalBars { labels, values } => {
            bar::draw_horizontal(root, spec, options, labels, values)
        }
        ChartData::Histogram { bins } => histogram::draw(root, spec, options, bins),
        ChartData::Line { points } => line::draw(root, spec, options, points),
        ChartData::Heatmap { matrix } => heatmap::draw(root, spec, options, matrix),
        ChartData::Pie { labels, values } => pie::draw(root, spec, options, labels, values),
    }
}

/// Title plus a centred "No data" note, for charts over an empty table
fn draw_placeholder<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    options: &RenderOptions,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let body = root.titled(&spec.title, title_font(options))?;
    let (w, h) = body.dim_in_pixel();
    let style = label_font(options)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    body.draw(&Text::new("No data", (w as i32 / 2, h as i32 / 2), style))?;
    Ok(())
}

pub(crate) fn title_font(options: &RenderOptions) -> FontDesc<'_> {
    (options.font_family.as_str(), f64::from(options.title_font_size)).into_font()
}

pub(crate) fn label_font(options: &RenderOptions) -> FontDesc<'_> {
    (options.font_family.as_str(), f64::from(options.label_font_size)).into_font()
}

/// Upper bound of a value axis: 10% headroom over the largest value, never 0
pub(crate) fn axis_max<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let max = values.into_iter().filter(|v| v.is_finite()).fold(0.0, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Last index of a segmented axis holding `n` categories
pub(crate) fn last_index(n: usize) -> u32 {
    n.saturating_sub(1) as u32
}

/// Category label for a segmented axis position
pub(crate) fn segment_label(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            labels.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}
