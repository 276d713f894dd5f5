//! Application configuration structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;
use webstat_analytics::DEFAULT_FUNNEL;
use webstat_common::{LogFormat, LoggingOptions};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Session log input
    #[validate]
    pub input: InputConfig,

    /// Text report and aggregate tuning
    #[validate]
    pub report: ReportConfig,

    /// Chart rendering settings
    #[validate]
    pub charts: ChartsConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingConfig,
}

/// Session log input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the delimited session log
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Input path is empty or contains invalid characters"))]
    pub path: String,

    /// Field delimiter, a single ASCII character
    #[validate(custom(function = "crate::validation::validate_delimiter", message = "Delimiter must be a single ASCII character"))]
    pub delimiter: String,

    /// Explicit chrono format for the timestamp column; tried before the built-in formats
    #[validate(length(min = 1, message = "Timestamp format cannot be empty if specified"))]
    pub timestamp_format: Option<String>,
}

/// Text report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of pages listed under "Top Visited Pages"
    #[validate(range(min = 1, max = 1000, message = "Top pages must be between 1 and 1000"))]
    pub top_pages: usize,

    /// Number of hours listed under "Peak Traffic Hour"
    #[validate(range(min = 1, max = 24, message = "Peak hours must be between 1 and 24"))]
    pub peak_hours: usize,

    /// Ordered funnel pages for the drop-off chart
    #[validate(length(min = 1, message = "At least one funnel page is required"))]
    pub funnel_pages: Vec<String>,

    /// Bin count of the session duration histogram
    #[validate(range(min = 1, max = 1000, message = "Histogram bins must be between 1 and 1000"))]
    pub histogram_bins: usize,
}

/// Chart rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartsConfig {
    /// Whether charts are rendered at all
    pub enabled: bool,

    /// Directory the PNG files are written to
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Output directory is empty or contains invalid characters"))]
    pub output_dir: String,

    /// Default chart width in pixels
    #[validate(range(min = 200, max = 4000, message = "Width must be between 200 and 4000 pixels"))]
    pub width: u32,

    /// Default chart height in pixels
    #[validate(range(min = 200, max = 4000, message = "Height must be between 200 and 4000 pixels"))]
    pub height: u32,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,

    /// Font family for text rendering
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Font size of chart titles
    #[validate(range(min = 8, max = 72, message = "Title font size must be between 8 and 72"))]
    pub title_font_size: u32,

    /// Font size of axis and tick labels
    #[validate(range(min = 6, max = 48, message = "Label font size must be between 6 and 48"))]
    pub label_font_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,

    /// Record format (full, compact, json)
    #[validate(custom(function = "crate::validation::validate_log_format", message = "Log format must be one of: full, compact, json"))]
    pub format: String,

    /// Optional log file path
    pub file: Option<String>,

    /// Whether to use colored output (for console logging)
    pub colored: bool,
}

impl Config {
    /// Validate the whole tree, nested sections included
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

impl InputConfig {
    /// The delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.bytes().next().unwrap_or(b',')
    }

    /// Input path as a `PathBuf`
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl ChartsConfig {
    /// Output directory as a `PathBuf`
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }
}

impl LoggingConfig {
    /// Convert to the options understood by the logging bootstrap
    pub fn to_options(&self) -> LoggingOptions {
        LoggingOptions {
            level: self.level.clone(),
            format: self.format.parse().unwrap_or(LogFormat::Full),
            colored: self.colored,
            file_path: self.file.as_ref().map(PathBuf::from),
            ..LoggingOptions::default()
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "web_traffic.csv".to_string(),
            delimiter: ",".to_string(),
            timestamp_format: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_pages: 10,
            peak_hours: 3,
            funnel_pages: DEFAULT_FUNNEL.iter().map(|p| (*p).to_string()).collect(),
            histogram_bins: 50,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: "charts".to_string(),
            width: 800,
            height: 600,
            background_color: "#FFFFFF".to_string(),
            font_family: "sans-serif".to_string(),
            title_font_size: 20,
            label_font_size: 13,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "full".to_string(),
            file: None,
            colored: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webstat_analytics::SummaryOptions;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate_all().is_ok());
        assert_eq!(config.input.path, "web_traffic.csv");
        assert_eq!(config.report.top_pages, 10);
        assert_eq!(config.report.peak_hours, 3);
        assert_eq!(config.report.histogram_bins, 50);
        assert_eq!(config.report.funnel_pages, vec!["/cart", "/checkout", "/thankyou"]);
        assert_eq!(config.charts.output_dir, "charts");
    }

    #[test]
    fn test_report_defaults_match_summary_defaults() {
        let report = ReportConfig::default();
        let summary = SummaryOptions::default();

        assert_eq!(report.funnel_pages, summary.funnel_pages);
        assert_eq!(report.top_pages, summary.top_pages);
        assert_eq!(report.peak_hours, summary.peak_hours);
        assert_eq!(report.histogram_bins, summary.histogram_bins);
    }

    #[test]
    fn test_nested_validation_reaches_sections() {
        let mut config = Config::default();
        config.charts.width = 50;
        assert!(config.validate_all().is_err());

        let mut config = Config::default();
        config.charts.background_color = "white".to_string();
        assert!(config.validate_all().is_err());

        let mut config = Config::default();
        config.report.funnel_pages.clear();
        assert!(config.validate_all().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate_all().is_err());

        let mut config = Config::default();
        config.input.delimiter = ";;".to_string();
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_delimiter_byte() {
        let mut input = InputConfig::default();
        assert_eq!(input.delimiter_byte(), b',');
        input.delimiter = ";".to_string();
        assert_eq!(input.delimiter_byte(), b';');
    }

    #[test]
    fn test_logging_options_conversion() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
            file: Some("/tmp/webstat.log".to_string()),
            colored: false,
        };
        let options = logging.to_options();
        assert_eq!(options.level, "debug");
        assert_eq!(options.format, LogFormat::Json);
        assert_eq!(options.file_path, Some(PathBuf::from("/tmp/webstat.log")));
        assert!(!options.colored);
    }
}
