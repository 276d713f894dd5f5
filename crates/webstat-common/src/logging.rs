//! Structured logging infrastructure for webstat
//!
//! Standard output is reserved for the report, so every layer built here
//! writes to stderr or to a log file.

use std::io;
use std::path::PathBuf;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format of the log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line records
    #[default]
    Full,
    /// Compact single-line records
    Compact,
    /// Newline-delimited JSON records
    Json,
}

/// Options for the logging system
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Log level filter (e.g., "info", "debug", "webstat_analytics=trace")
    pub level: String,
    /// Record format
    pub format: LogFormat,
    /// Whether to emit ANSI colours (ignored for file output)
    pub colored: bool,
    /// Optional file path for log output
    pub file_path: Option<PathBuf>,
    /// Whether to include span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            colored: true,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingOptions {
    /// Build the env filter; `RUST_LOG` wins over the configured level
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// Where records go: the log file path, or `stderr`
    fn sink(&self) -> String {
        self.file_path
            .as_ref()
            .map_or_else(|| "stderr".to_string(), |p| p.display().to_string())
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Initialize the tracing subscriber with the given options
pub fn init_logging(options: &LoggingOptions) -> io::Result<()> {
    let registry = tracing_subscriber::registry().with(options.env_filter());

    let file = match &options.file_path {
        Some(path) => Some(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        ),
        None => None,
    };
    let ansi = options.colored && file.is_none();

    match (options.format, file) {
        (LogFormat::Json, Some(file)) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(options.span_events())
                    .with_target(options.include_targets)
                    .with_writer(file),
            )
            .init(),
        (LogFormat::Json, None) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(options.span_events())
                    .with_target(options.include_targets)
                    .with_writer(io::stderr),
            )
            .init(),
        (LogFormat::Compact, Some(file)) => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_span_events(options.span_events())
                    .with_target(options.include_targets)
                    .with_writer(file),
            )
            .init(),
        (LogFormat::Compact, None) => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(ansi)
                    .with_span_events(options.span_events())
                    .with_target(options.include_targets)
                    .with_writer(io::stderr),
            )
            .init(),
        (LogFormat::Full, Some(file)) => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_span_events(options.span_events())
                    .with_target(options.include_targets)
                    .with_writer(file),
            )
            .init(),
        (LogFormat::Full, None) => registry
            .with(
                fmt::layer()
                    .with_ansi(ansi)
                    .with_span_events(options.span_events())
                    .with_target(options.include_targets)
                    .with_writer(io::stderr),
            )
            .init(),
    }

    tracing::debug!(
        format = ?options.format,
        sink = %options.sink(),
        level = %options.level,
        "logging initialized"
    );
    Ok(())
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "pretty" | "text" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}
