//! Chart generation for webstat
//!
//! The catalogue turns a [`TrafficSummary`](webstat_analytics::TrafficSummary)
//! into an ordered list of [`ChartSpec`] values; a [`ChartRenderer`] draws them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod colors;
pub mod draw;
pub mod renderer;
pub mod types;

pub use catalog::standard_charts;
pub use colors::parse_color;
pub use renderer::{render_all, BitmapRenderer, ChartRenderer, NoopRenderer, RenderSummary};
pub use types::*;
