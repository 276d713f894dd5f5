//! Load, derive, aggregate, report, chart: one pass per invocation

use crate::report::write_report;
use std::io::Write;
use tracing::{info, instrument};
use webstat_analytics::{derive_columns, SessionLoader, SummaryOptions, TrafficSummary};
use webstat_charts::{
    parse_color, render_all, standard_charts, BitmapRenderer, ChartRenderer, NoopRenderer,
    RenderOptions,
};
use webstat_common::Result;
use webstat_config::{ChartsConfig, Config, InputConfig, ReportConfig};

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// The aggregates behind the report and the charts
    pub summary: TrafficSummary,
    /// Number of charts the renderer accepted
    pub charts_rendered: usize,
}

/// The analysis run, parameterised by configuration
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Wrap a validated configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run with the renderer the configuration selects, reporting to `out`
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunOutcome> {
        let charts = &self.config.charts;
        if charts.enabled {
            let renderer = BitmapRenderer::new(charts.output_path(), render_options(charts))?;
            self.run_with(out, &renderer)
        } else {
            info!("Chart rendering disabled");
            self.run_with(out, &NoopRenderer)
        }
    }

    /// Run against an explicit renderer.
    ///
    /// The report is written before any chart is drawn. Chart failures are
    /// collected and turned into one render error after every chart was tried.
    #[instrument(skip_all, fields(input = %self.config.input.path, renderer = renderer.name()))]
    pub fn run_with<W: Write>(&self, out: &mut W, renderer: &dyn ChartRenderer) -> Result<RunOutcome> {
        let table = loader(&self.config.input).load(self.config.input.path_buf())?;
        let enriched = derive_columns(table);
        let summary = TrafficSummary::compute(&enriched, &summary_options(&self.config.report));

        write_report(out, &summary)?;
        out.flush()?;

        let specs = standard_charts(&summary);
        let charts_rendered = render_all(renderer, &specs).into_result()?;

        info!(
            sessions = summary.overview.total_sessions,
            charts = charts_rendered,
            "Analysis complete"
        );
        Ok(RunOutcome {
            summary,
            charts_rendered,
        })
    }
}

/// Loader configured with the input section's delimiter and timestamp format
pub fn loader(input: &InputConfig) -> SessionLoader {
    let loader = SessionLoader::new().with_delimiter(input.delimiter_byte());
    match &input.timestamp_format {
        Some(format) => loader.with_timestamp_format(format.clone()),
        None => loader,
    }
}

/// Aggregate sizes and funnel pages from the report section
pub fn summary_options(report: &ReportConfig) -> SummaryOptions {
    SummaryOptions {
        top_pages: report.top_pages,
        peak_hours: report.peak_hours,
        funnel_pages: report.funnel_pages.clone(),
        histogram_bins: report.histogram_bins,
    }
}

/// Canvas settings from the charts section; an unparseable colour falls back to white
pub fn render_options(charts: &ChartsConfig) -> RenderOptions {
    let defaults = RenderOptions::default();
    RenderOptions {
        width: charts.width,
        height: charts.height,
        background: parse_color(&charts.background_color).unwrap_or(defaults.background),
        font_family: charts.font_family.clone(),
        title_font_size: charts.title_font_size,
        label_font_size: charts.label_font_size,
    }
}
