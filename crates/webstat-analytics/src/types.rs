//! Aggregate result types

use chrono::NaiveDate;

/// Overall session KPIs
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overview {
    /// Number of sessions
    pub total_sessions: u64,
    /// Sessions flagged as bounces
    pub total_bounces: u64,
    /// Sessions flagged as conversions
    pub total_conversions: u64,
    /// Mean duration of sessions with a known duration; 0 when there are none
    pub avg_duration: f64,
    /// Bounce percentage, 2 decimals; 0 for an empty table
    pub bounce_rate: f64,
    /// Conversion percentage, 2 decimals; 0 for an empty table
    pub conversion_rate: f64,
}

/// Percentage of flagged sessions within one group
#[derive(Debug, Clone, PartialEq)]
pub struct RateEntry {
    /// Group label (source, device or page)
    pub label: String,
    /// Sessions in the group
    pub sessions: u64,
    /// Flagged share of the group as a percentage, 2 decimals
    pub rate: f64,
}

/// Relative frequency of one category
#[derive(Debug, Clone, PartialEq)]
pub struct ShareEntry {
    /// Category label
    pub label: String,
    /// Sessions in the category
    pub count: u64,
    /// Share of all sessions as a percentage, 2 decimals
    pub share: f64,
}

/// Session count for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountEntry<K> {
    /// Group key
    pub key: K,
    /// Sessions with this key
    pub count: u64,
}

impl<K> CountEntry<K> {
    /// Create a new count entry
    pub fn new(key: K, count: u64) -> Self {
        Self { key, count }
    }
}

/// Sessions per calendar day
pub type DailyCount = CountEntry<NaiveDate>;

/// Sessions per hour of day
pub type HourCount = CountEntry<u32>;

/// Sessions per page path
pub type PageCount = CountEntry<String>;

/// One equal-width histogram bin; `upper` is exclusive except on the last bin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub lower: f64,
    /// Upper edge
    pub upper: f64,
    /// Values falling in the bin
    pub count: u64,
}

/// Session counts by (hour, source), with absent pairs filled as zero
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HourSourceMatrix {
    /// Hours that occur in the data, ascending
    pub hours: Vec<u32>,
    /// Sources that occur in the data, ascending
    pub sources: Vec<String>,
    /// `counts[h][s]` is the count for `hours[h]` and `sources[s]`
    pub counts: Vec<Vec<u64>>,
}

impl HourSourceMatrix {
    /// Count for an (hour, source) pair; 0 when either is absent
    pub fn get(&self, hour: u32, source: &str) -> u64 {
        let row = self.hours.iter().position(|h| *h == hour);
        let col = self.sources.iter().position(|s| s == source);
        match (row, col) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    /// Largest cell value
    pub fn max(&self) -> u64 {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Sum of all cells
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Whether the matrix has no cells
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty() || self.sources.is_empty()
    }
}

/// Round to two decimals, the precision every reported percentage uses.
///
/// Ties go to the even digit, so `0.125` becomes `0.12`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// `part / whole * 100`, or 0 when `whole` is 0
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
