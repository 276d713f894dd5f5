//! # webstat
//!
//! Descriptive web-analytics over a session log: a text report on stdout and
//! a fixed set of PNG charts.
//!
//! The binary wires configuration and logging around [`Pipeline`].

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod pipeline;
pub mod report;

pub use pipeline::{Pipeline, RunOutcome};
pub use report::{render_report, write_report};
