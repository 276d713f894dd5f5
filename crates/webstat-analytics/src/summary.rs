//! Every aggregate the report and the charts need, computed in one pass

use crate::aggregator::Aggregator;
use crate::record::EnrichedTable;
use crate::types::{
    DailyCount, HistogramBin, HourCount, HourSourceMatrix, Overview, PageCount, RateEntry,
    ShareEntry,
};
use tracing::{info, instrument};

/// Pages of the purchase funnel, in funnel order
pub const DEFAULT_FUNNEL: [&str; 3] = ["/cart", "/checkout", "/thankyou"];

/// Sizes and funnel definition for [`TrafficSummary::compute`]
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOptions {
    /// Entries kept in the top-pages list
    pub top_pages: usize,
    /// Entries kept in the peak-hours list
    pub peak_hours: usize,
    /// Funnel pages, in order
    pub funnel_pages: Vec<String>,
    /// Bins of the duration histogram
    pub histogram_bins: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            top_pages: 10,
            peak_hours: 3,
            funnel_pages: DEFAULT_FUNNEL.iter().map(|p| p.to_string()).collect(),
            histogram_bins: 50,
        }
    }
}

/// Snapshot of all traffic aggregates for one table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrafficSummary {
    /// Scalar KPIs
    pub overview: Overview,
    /// Bounce rate per source, ascending
    pub bounce_by_source: Vec<RateEntry>,
    /// Conversion rate per device, ascending
    pub conversion_by_device: Vec<RateEntry>,
    /// Device share, descending
    pub device_share: Vec<ShareEntry>,
    /// Most visited pages
    pub top_pages: Vec<PageCount>,
    /// Busiest hours of day
    pub peak_hours: Vec<HourCount>,
    /// Every page, not truncated
    pub page_counts: Vec<PageCount>,
    /// Bounce rate per page, ascending
    pub bounce_by_page: Vec<RateEntry>,
    /// Funnel page counts in funnel order
    pub funnel: Vec<PageCount>,
    /// Duration histogram bins
    pub duration_histogram: Vec<HistogramBin>,
    /// Sessions per day
    pub daily_sessions: Vec<DailyCount>,
    /// Sessions per (hour, source)
    pub hour_source: HourSourceMatrix,
}

impl TrafficSummary {
    /// Run every aggregate over `table`
    #[instrument(skip_all, fields(sessions = table.len()))]
    pub fn compute(table: &EnrichedTable, options: &SummaryOptions) -> Self {
        let agg = Aggregator::new(table);

        let summary = Self {
            overview: agg.overview(),
            bounce_by_source: agg.bounce_rate_by_source(),
            conversion_by_device: agg.conversion_rate_by_device(),
            device_share: agg.device_share(),
            top_pages: agg.top_pages(options.top_pages),
            peak_hours: agg.peak_hours(options.peak_hours),
            page_counts: agg.page_counts(),
            bounce_by_page: agg.bounce_rate_by_page(),
            funnel: agg.funnel_counts(&options.funnel_pages),
            duration_histogram: agg.duration_histogram(options.histogram_bins),
            daily_sessions: agg.sessions_by_date(),
            hour_source: agg.sessions_by_hour_and_source(),
        };

        info!(
            sessions = summary.overview.total_sessions,
            sources = summary.bounce_by_source.len(),
            devices = summary.device_share.len(),
            pages = summary.page_counts.len(),
            "Aggregated traffic summary"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deriver::derive_columns;
    use crate::loader::SessionLoader;
    use webstat_common::test_utils::sample_csv;

    fn sample_table() -> EnrichedTable {
        let table = SessionLoader::new()
            .load_reader(sample_csv().as_bytes())
            .expect("sample parses");
        derive_columns(table)
    }

    #[test]
    fn test_compute_respects_options() {
        let table = sample_table();
        let options = SummaryOptions {
            top_pages: 2,
            peak_hours: 1,
            funnel_pages: vec!["/thankyou".to_string(), "/missing".to_string()],
            histogram_bins: 7,
        };

        let summary = TrafficSummary::compute(&table, &options);

        assert_eq!(summary.top_pages.len(), 2);
        assert_eq!(summary.page_counts.len(), 5);
        assert_eq!(summary.peak_hours.len(), 1);
        assert_eq!(summary.peak_hours[0].key, 9);
        assert_eq!(summary.funnel[0].count, 1);
        assert_eq!(summary.funnel[1].count, 0);
        assert_eq!(summary.duration_histogram.len(), 7);
    }

    #[test]
    fn test_default_options() {
        let table = sample_table();
        let summary = TrafficSummary::compute(&table, &SummaryOptions::default());

        assert_eq!(summary.overview.total_sessions, 8);
        assert_eq!(summary.duration_histogram.len(), 50);
        let funnel: Vec<&str> = summary.funnel.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(funnel, DEFAULT_FUNNEL.to_vec());
        assert_eq!(summary.daily_sessions.len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let summary = TrafficSummary::compute(&EnrichedTable::default(), &SummaryOptions::default());

        assert_eq!(summary.overview, Overview::default());
        assert_eq!(summary.funnel.len(), 3);
        assert!(summary.funnel.iter().all(|p| p.count == 0));
        assert!(summary.duration_histogram.is_empty());
    }
}
