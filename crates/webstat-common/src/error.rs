//! Error types and utilities for webstat

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for webstat operations
pub type Result<T> = std::result::Result<T, WebStatError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for webstat operations
#[derive(Error, Debug)]
pub enum WebStatError {
    /// Missing or unreadable input, or an unwritable output location
    #[error("File error: {message}")]
    File {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Malformed input data or a missing required column
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        /// 1-based line in the input file, header included
        line: Option<u64>,
        column: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Chart backend unavailable or a drawing failure
    #[error("Render error: {message}")]
    Render {
        message: String,
        chart: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Unreadable, malformed or invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WebStatError {
    /// Create a new file error for `path`
    pub fn file(msg: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::File {
            message: msg.into(),
            path: Some(path.as_ref().to_path_buf()),
            source: None,
        }
    }

    /// Create a new file error for `path` with source
    pub fn file_with_source(
        msg: impl Into<String>,
        path: impl AsRef<Path>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::File {
            message: msg.into(),
            path: Some(path.as_ref().to_path_buf()),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error without a location
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            line: None,
            column: None,
            source: None,
        }
    }

    /// Create a new parse error located at `line` / `column`
    pub fn parse_at(msg: impl Into<String>, line: u64, column: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            line: Some(line),
            column: Some(column.into()),
            source: None,
        }
    }

    /// Create a new parse error with source
    pub fn parse_with_source(
        msg: impl Into<String>,
        line: Option<u64>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            message: msg.into(),
            line,
            column: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            chart: None,
            source: None,
        }
    }

    /// Create a new render error for a named chart
    pub fn render_chart(msg: impl Into<String>, chart: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            chart: Some(chart.into()),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            chart: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Attach the chart name to a render error; other variants pass through
    #[must_use]
    pub fn for_chart(self, name: &str) -> Self {
        match self {
            Self::Render {
                message,
                chart: None,
                source,
            } => Self::Render {
                message,
                chart: Some(name.to_string()),
                source,
            },
            other => other,
        }
    }

    /// Short kind label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::File { .. } => "file",
            Self::Parse { .. } => "parse",
            Self::Render { .. } => "render",
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to WebStatError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for WebStatError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("Chart rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let file_error = WebStatError::file("input not found", "web_traffic.csv");
        assert_eq!(file_error.to_string(), "File error: input not found");
        assert!(matches!(
            file_error,
            WebStatError::File { path: Some(ref p), .. } if p == Path::new("web_traffic.csv")
        ));

        let parse_error = WebStatError::parse_at("bad timestamp", 7, "timestamp");
        assert_eq!(parse_error.to_string(), "Parse error: bad timestamp");
        match parse_error {
            WebStatError::Parse { line, column, .. } => {
                assert_eq!(line, Some(7));
                assert_eq!(column.as_deref(), Some("timestamp"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }

        let config_error = WebStatError::config("missing field");
        assert_eq!(config_error.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "No such file");
        let wrapped = WebStatError::file_with_source("Failed to open input", "x.csv", io_error);

        assert!(wrapped.to_string().contains("Failed to open input"));
        assert!(wrapped.source().is_some());
    }

    #[test]
    fn test_for_chart_only_fills_missing_name() {
        let err = WebStatError::render("no font").for_chart("daily_sessions");
        assert!(matches!(err, WebStatError::Render { chart: Some(ref c), .. } if c == "daily_sessions"));

        let named = WebStatError::render_chart("boom", "pie").for_chart("other");
        assert!(matches!(named, WebStatError::Render { chart: Some(ref c), .. } if c == "pie"));

        let untouched = WebStatError::parse("x").for_chart("pie");
        assert_eq!(untouched.kind(), "parse");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        let err: WebStatError = io_error.into();

        assert!(err.to_string().starts_with("I/O error"));
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn test_result_type_alias() {
        fn fails() -> Result<u32> {
            Err(WebStatError::render("backend unavailable"))
        }

        let err = fails().unwrap_err();
        assert_eq!(err.kind(), "render");
    }
}
