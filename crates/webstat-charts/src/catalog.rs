//! The fixed, ordered list of charts produced for every run

use crate::colors::{
    CORAL, DARK_ORANGE, DEFAULT_BLUE, EDGE_BLACK, GOLD, LIGHT_BLUE, LIGHT_GREEN, MEDIUM_SEA_GREEN,
    ORCHID, SKY_BLUE, STEEL_BLUE,
};
use crate::types::{ChartData, ChartSpec, ChartStyle};
use webstat_analytics::{PageCount, RateEntry, TrafficSummary};

/// Canvas of the daily sessions line chart
pub const DAILY_SESSIONS_SIZE: (u32, u32) = (1000, 400);

/// Build the nine chart specs, in output order, from `summary`.
///
/// The list always has nine entries; a chart with no data is still listed and
/// renders an empty canvas.
pub fn standard_charts(summary: &TrafficSummary) -> Vec<ChartSpec> {
    let (funnel_labels, funnel_values) = page_series(&summary.funnel);
    let funnel_title = format!("Funnel Drop-off: {}", funnel_caption(&funnel_labels));

    let specs = vec![
        spec(
            "bounce_rate_by_source",
            "Bounce Rate by Source",
            None,
            Some("Bounce Rate (%)"),
            ChartStyle::solid(CORAL),
            rate_bars(&summary.bounce_by_source),
        ),
        spec(
            "conversion_rate_by_device",
            "Conversion Rate by Device",
            None,
            Some("Conversion Rate (%)"),
            ChartStyle::solid(MEDIUM_SEA_GREEN),
            rate_bars(&summary.conversion_by_device),
        ),
        spec(
            "session_duration",
            "Session Duration Distribution",
            Some("Duration (seconds)"),
            Some("Sessions"),
            ChartStyle::solid(SKY_BLUE).with_edge(EDGE_BLACK),
            ChartData::Histogram {
                bins: summary.duration_histogram.clone(),
            },
        ),
        {
            let (labels, values) = page_series(&summary.page_counts);
            spec(
                "most_visited_pages",
                "Most Visited Pages",
                None,
                Some("Session Count"),
                ChartStyle::solid(STEEL_BLUE),
                ChartData::Bars {
                    labels,
                    values,
                    rotate_labels: true,
                },
            )
        },
        spec(
            "funnel_dropoff",
            &funnel_title,
            None,
            Some("Sessions"),
            ChartStyle::solid(ORCHID),
            ChartData::Bars {
                labels: funnel_labels,
                values: funnel_values,
                rotate_labels: false,
            },
        ),
        spec(
            "bounce_rate_by_page",
            "Bounce Rate by Page",
            Some("Bounce Rate (%)"),
            None,
            ChartStyle::solid(DARK_ORANGE),
            ChartData::HorizontalBars {
                labels: summary.bounce_by_page.iter().map(|e| e.label.clone()).collect(),
                values: summary.bounce_by_page.iter().map(|e| e.rate).collect(),
            },
        ),
        ChartSpec {
            size: Some(DAILY_SESSIONS_SIZE),
            ..spec(
                "daily_sessions",
                "Daily Sessions Over Time",
                Some("Date"),
                Some("Session Count"),
                ChartStyle::solid(DEFAULT_BLUE),
                ChartData::Line {
                    points: summary
                        .daily_sessions
                        .iter()
                        .map(|d| (d.key, d.count as f64))
                        .collect(),
                },
            )
        },
        spec(
            "traffic_by_hour_source",
            "Traffic by Hour & Source",
            None,
            Some("Hour of Day"),
            ChartStyle::solid(DEFAULT_BLUE),
            ChartData::Heatmap {
                matrix: summary.hour_source.clone(),
            },
        ),
        spec(
            "device_distribution",
            "Device Distribution",
            None,
            None,
            ChartStyle {
                fill: vec![GOLD, LIGHT_BLUE, LIGHT_GREEN],
                edge: None,
            },
            ChartData::Pie {
                labels: summary.device_share.iter().map(|s| s.label.clone()).collect(),
                values: summary.device_share.iter().map(|s| s.count as f64).collect(),
            },
        ),
    ];

    specs
        .into_iter()
        .enumerate()
        .map(|(i, spec)| ChartSpec { index: i + 1, ..spec })
        .collect()
}

fn spec(
    stem: &'static str,
    title: &str,
    x_label: Option<&str>,
    y_label: Option<&str>,
    style: ChartStyle,
    data: ChartData,
) -> ChartSpec {
    ChartSpec {
        index: 0,
        stem,
        title: title.to_string(),
        x_label: x_label.map(str::to_string),
        y_label: y_label.map(str::to_string),
        size: None,
        style,
        data,
    }
}

fn rate_bars(entries: &[RateEntry]) -> ChartData {
    ChartData::Bars {
        labels: entries.iter().map(|e| e.label.clone()).collect(),
        values: entries.iter().map(|e| e.rate).collect(),
        rotate_labels: false,
    }
}

fn page_series(pages: &[PageCount]) -> (Vec<String>, Vec<f64>) {
    pages.iter().map(|p| (p.key.clone(), p.count as f64)).unzip()
}

/// "/cart", "/checkout" -> "Cart ➝ Checkout"
fn funnel_caption(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| {
            let name = page.trim_matches('/');
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => page.clone(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ➝ ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChartKind;
    use webstat_analytics::{derive_columns, SessionLoader, SummaryOptions};
    use webstat_common::test_utils::sample_csv;

    fn sample_summary() -> TrafficSummary {
        let table = SessionLoader::new()
            .load_reader(sample_csv().as_bytes())
            .expect("sample parses");
        TrafficSummary::compute(&derive_columns(table), &SummaryOptions::default())
    }

    #[test]
    fn test_catalogue_order_and_names() {
        let specs = standard_charts(&sample_summary());
        let files: Vec<String> = specs.iter().map(ChartSpec::file_name).collect();

        assert_eq!(
            files,
            vec![
                "01_bounce_rate_by_source.png",
                "02_conversion_rate_by_device.png",
                "03_session_duration.png",
                "04_most_visited_pages.png",
                "05_funnel_dropoff.png",
                "06_bounce_rate_by_page.png",
                "07_daily_sessions.png",
                "08_traffic_by_hour_source.png",
                "09_device_distribution.png",
            ]
        );

        let kinds: Vec<ChartKind> = specs.iter().map(ChartSpec::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Bar,
                ChartKind::Bar,
                ChartKind::Histogram,
                ChartKind::Bar,
                ChartKind::Bar,
                ChartKind::HorizontalBar,
                ChartKind::Line,
                ChartKind::Heatmap,
                ChartKind::Pie,
            ]
        );
    }

    #[test]
    fn test_empty_summary_still_yields_nine_specs() {
        let specs = standard_charts(&TrafficSummary::default());
        assert_eq!(specs.len(), 9);
        assert!(specs.iter().all(|s| s.data.is_empty()));
    }

    #[test]
    fn test_titles_labels_and_colours() {
        let specs = standard_charts(&sample_summary());

        assert_eq!(specs[0].title, "Bounce Rate by Source");
        assert_eq!(specs[0].y_label.as_deref(), Some("Bounce Rate (%)"));
        assert_eq!(specs[0].style.primary(), CORAL);
        assert_eq!(specs[2].style.edge, Some(EDGE_BLACK));
        assert_eq!(specs[4].title, "Funnel Drop-off: Cart ➝ Checkout ➝ Thankyou");
        assert_eq!(specs[5].x_label.as_deref(), Some("Bounce Rate (%)"));
        assert_eq!(specs[5].y_label, None);
        assert_eq!(specs[6].size, Some(DAILY_SESSIONS_SIZE));
        assert_eq!(specs[6].title, "Daily Sessions Over Time");
        assert_eq!(specs[7].title, "Traffic by Hour & Source");
        assert_eq!(specs[8].style.fill, vec![GOLD, LIGHT_BLUE, LIGHT_GREEN]);
    }

    #[test]
    fn test_chart_data_follows_summary() {
        let specs = standard_charts(&sample_summary());

        match &specs[0].data {
            ChartData::Bars { labels, values, rotate_labels } => {
                assert_eq!(labels, &vec!["organic", "ads", "google"]);
                assert_eq!(values, &vec![0.0, 33.33, 66.67]);
                assert!(!rotate_labels);
            }
            other => panic!("unexpected data: {other:?}"),
        }

        match &specs[3].data {
            ChartData::Bars { labels, rotate_labels, .. } => {
                assert_eq!(labels.len(), 5);
                assert!(rotate_labels);
            }
            other => panic!("unexpected data: {other:?}"),
        }

        match &specs[8].data {
            ChartData::Pie { labels, values } => {
                assert_eq!(labels, &vec!["desktop", "mobile", "tablet"]);
                assert_eq!(values, &vec![4.0, 3.0, 1.0]);
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_funnel_caption() {
        let pages = vec!["/cart".to_string(), "/check-out".to_string(), "/".to_string()];
        assert_eq!(funnel_caption(&pages), "Cart ➝ Check-out ➝ /");
    }
}
