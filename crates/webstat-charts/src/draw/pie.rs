//! Device share pie chart with `%.1f%%` slice labels

use super::{label_font, title_font};
use crate::types::{ChartSpec, RenderOptions};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::TAU;
use webstat_common::Result;

/// Polygon points per full turn of the circle
const ARC_RESOLUTION: f64 = 360.0;

/// One slice: angles in radians, counter-clockwise from the positive x axis
#[derive(Debug, Clone, Copy, PartialEq)]
struct Slice {
    start: f64,
    end: f64,
    percent: f64,
}

impl Slice {
    fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

pub(super) fn draw<DB>(
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
    let body = root.titled(&spec.title, title_font(options))?;
    let (w, h) = body.dim_in_pixel();
    let center = (w as f64 / 2.0, h as f64 / 2.0);
    let radius = f64::from(w.min(h)) * 0.35;

    let colors = if spec.style.fill.is_empty() {
        vec![spec.style.primary()]
    } else {
        spec.style.fill.clone()
    };
    for (i, slice) in slices(values).iter().enumerate() {
        let color = colors[i % colors.len()];
        body.draw(&Polygon::new(wedge(center, radius, slice), color.filled()))?;

        let mid = slice.mid();
        body.draw(&Text::new(
            format!("{:.1}%", slice.percent),
            polar(center, radius * 0.6, mid),
            centered(label_font(options).color(&BLACK)),
        ))?;
        if let Some(label) = labels.get(i) {
            body.draw(&Text::new(
                label.clone(),
                polar(center, radius * 1.15, mid),
                centered(label_font(options).color(&BLACK)),
            ))?;
        }
    }

    Ok(())
}

/// Split the full turn proportionally to `values`; non-positive values get no slice
fn slices(values: &[f64]) -> Vec<Slice> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    values
        .iter()
        .map(|v| {
            let fraction = v.max(0.0) / total;
            let slice = Slice {
                start,
                end: start + fraction * TAU,
                percent: fraction * 100.0,
            };
            start = slice.end;
            slice
        })
        .collect()
}

fn centered(style: TextStyle<'_>) -> TextStyle<'_> {
    style.pos(Pos::new(HPos::Center, VPos::Center))
}

fn polar(center: (f64, f64), radius: f64, angle: f64) -> (i32, i32) {
    (
        (center.0 + radius * angle.cos()).round() as i32,
        (center.1 - radius * angle.sin()).round() as i32,
    )
}

fn wedge(center: (f64, f64), radius: f64, slice: &Slice) -> Vec<(i32, i32)> {
    let steps = ((slice.end - slice.start) / TAU * ARC_RESOLUTION).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push((center.0.round() as i32, center.1.round() as i32));
    for step in 0..=steps {
        let angle = slice.start + (slice.end - slice.start) * step as f64 / steps as f64;
        points.push(polar(center, radius, angle));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices_cover_full_turn() {
        let parts = slices(&[4.0, 3.0, 1.0]);

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].start, 0.0);
        assert!((parts[2].end - TAU).abs() < 1e-9);
        assert!((parts[0].percent - 50.0).abs() < 1e-9);
        assert!((parts[1].percent - 37.5).abs() < 1e-9);
        assert_eq!(format!("{:.1}%", parts[2].percent), "12.5%");
    }

    #[test]
    fn test_slices_of_nothing() {
        assert!(slices(&[]).is_empty());
        assert!(slices(&[0.0, 0.0]).is_empty());
    }

    #[test]
    fn test_polar_orientation() {
        assert_eq!(polar((100.0, 100.0), 10.0, 0.0), (110, 100));
        // Counter-clockwise: a quarter turn points up on screen
        assert_eq!(polar((100.0, 100.0), 10.0, TAU / 4.0), (100, 90));
    }

    #[test]
    fn test_wedge_starts_at_center() {
        let slice = Slice {
            start: 0.0,
            end: TAU / 2.0,
            percent: 50.0,
        };
        let points = wedge((50.0, 50.0), 20.0, &slice);

        assert_eq!(points[0], (50, 50));
        assert_eq!(points[1], (70, 50));
        assert_eq!(*points.last().unwrap(), (30, 50));
    }
}
