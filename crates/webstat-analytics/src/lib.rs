//! # webstat analytics
//!
//! Loads a session log into a typed table, derives the hour and date columns
//! and computes the traffic aggregates the report and the charts consume.
//!
//! Every stage takes its input by value or by shared reference and returns a
//! new value:
//!
//! ```text
//! SessionLoader::load -> SessionTable -> derive_columns -> EnrichedTable -> Aggregator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod deriver;
pub mod loader;
pub mod record;
pub mod summary;
pub mod types;

pub use aggregator::Aggregator;
pub use deriver::derive_columns;
pub use loader::{SessionLoader, REQUIRED_COLUMNS};
pub use record::{EnrichedSession, EnrichedTable, SessionRecord, SessionTable};
pub use summary::{SummaryOptions, TrafficSummary, DEFAULT_FUNNEL};
pub use types::*;
