//! Chart specifications and render settings

use chrono::NaiveDate;
use plotters::style::RGBColor;
use webstat_analytics::{HistogramBin, HourSourceMatrix};

/// Supported chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Vertical bars over categories
    Bar,
    /// Horizontal bars over categories
    HorizontalBar,
    /// Contiguous bins over a numeric axis
    Histogram,
    /// Line with point markers over dates
    Line,
    /// Colour-coded grid of counts
    Heatmap,
    /// Proportional slices of a circle
    Pie,
}

/// Values plotted by a chart
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// Vertical bars over categorical labels
    Bars {
        /// Category labels, left to right
        labels: Vec<String>,
        /// Bar heights, one per label
        values: Vec<f64>,
        /// Draw category labels vertically
        rotate_labels: bool,
    },
    /// Horizontal bars, first label at the bottom
    HorizontalBars {
        /// Category labels, bottom to top
        labels: Vec<String>,
        /// Bar lengths, one per label
        values: Vec<f64>,
    },
    /// Contiguous histogram bins
    Histogram {
        /// Ordered bins
        bins: Vec<HistogramBin>,
    },
    /// A single series over calendar days
    Line {
        /// `(day, value)` points in date order
        points: Vec<(NaiveDate, f64)>,
    },
    /// Counts by hour (rows) and source (columns)
    Heatmap {
        /// Counts with their row and column axes
        matrix: HourSourceMatrix,
    },
    /// Slices with a percentage label each
    Pie {
        /// Slice labels
        labels: Vec<String>,
        /// Slice weights, one per label
        values: Vec<f64>,
    },
}

impl ChartData {
    /// Kind of chart these values are drawn as
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Bars { .. } => ChartKind::Bar,
            Self::HorizontalBars { .. } => ChartKind::HorizontalBar,
            Self::Histogram { .. } => ChartKind::Histogram,
            Self::Line { .. } => ChartKind::Line,
            Self::Heatmap { .. } => ChartKind::Heatmap,
            Self::Pie { .. } => ChartKind::Pie,
        }
    }

    /// Whether there is nothing to plot
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bars { values, .. }
            | Self::HorizontalBars { values, .. }
            | Self::Pie { values, .. } => values.is_empty(),
            Self::Histogram { bins } => bins.is_empty(),
            Self::Line { points } => points.is_empty(),
            Self::Heatmap { matrix } => matrix.is_empty(),
        }
    }
}

/// Fill and outline colours of a chart's series
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Series colours; bars use the first, pie slices cycle through all
    pub fill: Vec<RGBColor>,
    /// Optional outline drawn around bars
    pub edge: Option<RGBColor>,
}

impl ChartStyle {
    /// One fill colour, no outline
    pub fn solid(color: RGBColor) -> Self {
        Self {
            fill: vec![color],
            edge: None,
        }
    }

    /// Add an outline colour
    pub fn with_edge(mut self, edge: RGBColor) -> Self {
        self.edge = Some(edge);
        self
    }

    /// Primary fill colour
    pub fn primary(&self) -> RGBColor {
        self.fill.first().copied().unwrap_or(crate::colors::DEFAULT_BLUE)
    }
}

/// One entry of the chart catalogue
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// 1-based position in the catalogue
    pub index: usize,
    /// File name stem
    pub stem: &'static str,
    /// Caption drawn above the plot
    pub title: String,
    /// Horizontal axis description
    pub x_label: Option<String>,
    /// Vertical axis description
    pub y_label: Option<String>,
    /// Canvas size overriding the configured default
    pub size: Option<(u32, u32)>,
    /// Series colours
    pub style: ChartStyle,
    /// Values to plot
    pub data: ChartData,
}

impl ChartSpec {
    /// `NN_<stem>.png`
    pub fn file_name(&self) -> String {
        format!("{:02}_{}.png", self.index, self.stem)
    }

    /// Kind of chart, derived from the data
    pub fn kind(&self) -> ChartKind {
        self.data.kind()
    }

    /// Canvas size, falling back to `default`
    pub fn canvas_size(&self, default: (u32, u32)) -> (u32, u32) {
        self.size.unwrap_or(default)
    }
}

/// Canvas and font settings shared by every chart
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Default canvas width in pixels
    pub width: u32,
    /// Default canvas height in pixels
    pub height: u32,
    /// Canvas fill colour
    pub background: RGBColor,
    /// Font family of every text element
    pub font_family: String,
    /// Caption size in points
    pub title_font_size: u32,
    /// Axis and tick label size in points
    pub label_font_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: RGBColor(255, 255, 255),
            font_family: "sans-serif".to_string(),
            title_font_size: 20,
            label_font_size: 13,
        }
    }
}
