//! Grouped aggregation over the enriched session table
//!
//! Every method on [`Aggregator`] is a read-only pass over the table and
//! returns a fresh value, so the report and the chart catalogue can ask for
//! the same aggregate independently.

use crate::record::{EnrichedSession, EnrichedTable};
use crate::types::{
    percentage, round2, DailyCount, HistogramBin, HourCount, HourSourceMatrix, Overview,
    PageCount, RateEntry, ShareEntry,
};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, instrument};

/// Read-only view that computes traffic aggregates
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    table: &'a EnrichedTable,
}

impl<'a> Aggregator<'a> {
    /// Borrow an enriched table for aggregation
    pub fn new(table: &'a EnrichedTable) -> Self {
        Self { table }
    }

    /// Number of sessions in the underlying table
    pub fn total_sessions(&self) -> u64 {
        self.table.len() as u64
    }

    /// Scalar KPIs: totals, mean duration and both overall rates
    #[instrument(skip(self))]
    pub fn overview(&self) -> Overview {
        let total_sessions = self.total_sessions();
        let total_bounces = self.table.iter().filter(|s| s.bounce()).count() as u64;
        let total_conversions = self.table.iter().filter(|s| s.conversion()).count() as u64;

        let (duration_sum, duration_count) = self
            .table
            .iter()
            .filter_map(EnrichedSession::duration)
            .fold((0.0, 0u64), |(sum, n), d| (sum + d, n + 1));
        let avg_duration = if duration_count == 0 {
            0.0
        } else {
            duration_sum / duration_count as f64
        };

        let overview = Overview {
            total_sessions,
            total_bounces,
            total_conversions,
            avg_duration,
            bounce_rate: round2(percentage(total_bounces, total_sessions)),
            conversion_rate: round2(percentage(total_conversions, total_sessions)),
        };
        debug!(?overview, "computed overview");
        overview
    }

    /// Mean bounce flag per source, ascending by rate
    pub fn bounce_rate_by_source(&self) -> Vec<RateEntry> {
        self.rate_by(EnrichedSession::source, EnrichedSession::bounce)
    }

    /// Mean conversion flag per device, ascending by rate
    pub fn conversion_rate_by_device(&self) -> Vec<RateEntry> {
        self.rate_by(EnrichedSession::device, EnrichedSession::conversion)
    }

    /// Mean bounce flag per page, ascending by rate
    pub fn bounce_rate_by_page(&self) -> Vec<RateEntry> {
        self.rate_by(EnrichedSession::page, EnrichedSession::bounce)
    }

    /// Share of sessions per device, descending by count
    pub fn device_share(&self) -> Vec<ShareEntry> {
        let total = self.total_sessions();
        let shares: Vec<ShareEntry> = self
            .count_by(EnrichedSession::device)
            .into_iter()
            .map(|entry| ShareEntry {
                share: round2(percentage(entry.count, total)),
                label: entry.key,
                count: entry.count,
            })
            .collect();

        debug!(groups = shares.len(), "computed device share");
        shares
    }

    /// Session count of every page, descending
    pub fn page_counts(&self) -> Vec<PageCount> {
        self.count_by(EnrichedSession::page)
    }

    /// The `n` most visited pages, descending
    pub fn top_pages(&self, n: usize) -> Vec<PageCount> {
        let mut pages = self.page_counts();
        pages.truncate(n);
        pages
    }

    /// The `n` busiest hours of day, descending by count
    pub fn peak_hours(&self, n: usize) -> Vec<HourCount> {
        let mut counts: HashMap<u32, u64> = HashMap::new();
        for session in self.table {
            *counts.entry(session.hour()).or_insert(0) += 1;
        }

        let mut hours: Vec<HourCount> = counts
            .into_iter()
            .map(|(hour, count)| HourCount::new(hour, count))
            .collect();
        hours.sort_by(|a, b| b.count.cmp(&a.count).then(a.key.cmp(&b.key)));
        hours.truncate(n);
        hours
    }

    /// Sessions per calendar day, ascending by date
    pub fn sessions_by_date(&self) -> Vec<DailyCount> {
        let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for session in self.table {
            *counts.entry(session.date()).or_insert(0) += 1;
        }

        let daily: Vec<DailyCount> = counts
            .into_iter()
            .map(|(date, count)| DailyCount::new(date, count))
            .collect();
        debug!(days = daily.len(), "computed daily sessions");
        daily
    }

    /// Session counts for every (hour, source) pair seen in the data
    pub fn sessions_by_hour_and_source(&self) -> HourSourceMatrix {
        let hours: Vec<u32> = self
            .table
            .iter()
            .map(EnrichedSession::hour)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let sources: Vec<String> = self
            .table
            .iter()
            .map(|s| s.source().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut counts = vec![vec![0u64; sources.len()]; hours.len()];
        for session in self.table {
            // Both lookups succeed: the axes were built from these rows.
            if let (Ok(row), Ok(col)) = (
                hours.binary_search(&session.hour()),
                sources.binary_search_by(|s| s.as_str().cmp(session.source())),
            ) {
                counts[row][col] += 1;
            }
        }

        HourSourceMatrix {
            hours,
            sources,
            counts,
        }
    }

    /// Session counts for `funnel` pages in the given order; absent pages count 0
    pub fn funnel_counts(&self, funnel: &[String]) -> Vec<PageCount> {
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for session in self.table {
            *counts.entry(session.page()).or_insert(0) += 1;
        }

        funnel
            .iter()
            .map(|page| PageCount::new(page.clone(), counts.get(page.as_str()).copied().unwrap_or(0)))
            .collect()
    }

    /// Equal-width histogram of the known durations.
    ///
    /// The bins span `[min, max]` with the last bin closed on the right. When
    /// every duration is the same value `v` the range becomes `[v - 0.5, v + 0.5]`.
    /// Returns no bins when there are no durations or `bins` is 0.
    pub fn duration_histogram(&self, bins: usize) -> Vec<HistogramBin> {
        let values: Vec<f64> = self
            .table
            .iter()
            .filter_map(EnrichedSession::duration)
            .filter(|d| d.is_finite())
            .collect();
        if values.is_empty() || bins == 0 {
            return Vec::new();
        }

        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            min -= 0.5;
            max += 0.5;
        }
        let width = (max - min) / bins as f64;

        let mut histogram: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();

        for value in values {
            let index = (((value - min) / width).floor() as usize).min(bins - 1);
            histogram[index].count += 1;
        }

        debug!(bins, "computed duration histogram");
        histogram
    }

    /// Flag rate per group, sorted ascending on the unrounded rate
    fn rate_by<K, F>(&self, key: K, flag: F) -> Vec<RateEntry>
    where
        K: Fn(&EnrichedSession) -> &str,
        F: Fn(&EnrichedSession) -> bool,
    {
        let mut groups: HashMap<&str, (u64, u64)> = HashMap::new();
        for session in self.table {
            let group = groups.entry(key(session)).or_insert((0, 0));
            group.0 += 1;
            if flag(session) {
                group.1 += 1;
            }
        }

        let mut rates: Vec<(&str, u64, f64)> = groups
            .into_iter()
            .map(|(label, (sessions, flagged))| (label, sessions, percentage(flagged, sessions)))
            .collect();
        rates.sort_by(|a, b| {
            a.2.partial_cmp(&b.2)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        debug!(groups = rates.len(), "computed grouped rate");
        rates
            .into_iter()
            .map(|(label, sessions, rate)| RateEntry {
                label: label.to_string(),
                sessions,
                rate: round2(rate),
            })
            .collect()
    }

    /// Sessions per category, descending by count then ascending by label
    fn count_by<K>(&self, key: K) -> Vec<PageCount>
    where
        K: Fn(&EnrichedSession) -> &str,
    {
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for session in self.table {
            *counts.entry(key(session)).or_insert(0) += 1;
        }

        let mut entries: Vec<PageCount> = counts
            .into_iter()
            .map(|(label, count)| PageCount::new(label.to_string(), count))
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        entries
    }
}
