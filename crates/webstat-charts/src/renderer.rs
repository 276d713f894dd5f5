//! Chart renderer trait and implementations

use crate::draw::draw_chart;
use crate::types::{ChartSpec, RenderOptions};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use webstat_common::{Result, WebStatError};

/// Renders one chart specification at a time
pub trait ChartRenderer {
    /// Render `spec`; a failure affects this chart only
    fn render(&self, spec: &ChartSpec) -> Result<()>;

    /// Short name used in log output
    fn name(&self) -> &'static str;
}

/// Writes each chart as `NN_<stem>.png` into an output directory
#[derive(Debug, Clone)]
pub struct BitmapRenderer {
    output_dir: PathBuf,
    options: RenderOptions,
}

impl BitmapRenderer {
    /// Create the renderer, creating `output_dir` if it does not exist
    pub fn new(output_dir: impl Into<PathBuf>, options: RenderOptions) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| {
            WebStatError::file_with_source("Failed to create chart output directory", &output_dir, e)
        })?;
        debug!(dir = %output_dir.display(), "chart output directory ready");

        Ok(Self {
            output_dir,
            options,
        })
    }

    /// Directory the PNG files are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where `spec` is written
    pub fn path_for(&self, spec: &ChartSpec) -> PathBuf {
        self.output_dir.join(spec.file_name())
    }
}

impl ChartRenderer for BitmapRenderer {
    #[instrument(skip_all, fields(chart = spec.stem))]
    fn render(&self, spec: &ChartSpec) -> Result<()> {
        let path = self.path_for(spec);
        let size = spec.canvas_size((self.options.width, self.options.height));

        let root = BitMapBackend::new(&path, size).into_drawing_area();
        draw_chart(&root, spec, &self.options).map_err(|e| e.for_chart(spec.stem))?;
        root.present()
            .map_err(|e| WebStatError::from(e).for_chart(spec.stem))?;

        info!("Successfully rendered {} to {}", spec.stem, path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "bitmap"
    }
}

/// Accepts every chart without drawing anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl ChartRenderer for NoopRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<()> {
        debug!(chart = spec.stem, "skipping chart");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Outcome of rendering a list of charts
#[derive(Debug, Default)]
pub struct RenderSummary {
    /// File names of the charts that rendered
    pub rendered: Vec<String>,
    /// Stem and error of every chart that failed
    pub failed: Vec<(String, WebStatError)>,
}

impl RenderSummary {
    /// Whether every chart rendered
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// `Ok(rendered count)`, or a render error naming every failed chart
    pub fn into_result(self) -> Result<usize> {
        if self.failed.is_empty() {
            return Ok(self.rendered.len());
        }

        let names: Vec<&str> = self.failed.iter().map(|(name, _)| name.as_str()).collect();
        let total = self.rendered.len() + self.failed.len();
        Err(WebStatError::render_chart(
            format!("{} of {} charts failed: {}", names.len(), total, names.join(", ")),
            names.join(","),
        ))
    }
}

/// Render every spec in order. A failing chart is logged and skipped; the rest still render.
pub fn render_all(renderer: &dyn ChartRenderer, specs: &[ChartSpec]) -> RenderSummary {
    let mut summary = RenderSummary::default();

    for spec in specs {
        match renderer.render(spec) {
            Ok(()) => summary.rendered.push(spec.file_name()),
            Err(e) => {
                warn!(chart = spec.stem, renderer = renderer.name(), error = %e, "chart failed to render");
                summary.failed.push((spec.stem.to_string(), e));
            }
        }
    }

    info!(
        rendered = summary.rendered.len(),
        failed = summary.failed.len(),
        renderer = renderer.name(),
        "Chart rendering finished"
    );
    summary
}
