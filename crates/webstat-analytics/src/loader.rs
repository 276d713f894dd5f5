//! Delimited session log reader

use crate::record::{SessionRecord, SessionTable};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use webstat_common::{Result, WebStatError};

/// Columns every session log must carry
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "session_id",
    "timestamp",
    "source",
    "device",
    "page",
    "bounce",
    "conversion",
    "duration",
];

/// Timestamp layouts tried in order when no explicit format is configured
const TIMESTAMP_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Positions of the required columns within the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    session_id: usize,
    timestamp: usize,
    source: usize,
    device: usize,
    page: usize,
    bounce: usize,
    conversion: usize,
    duration: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| position(*name).is_none())
            .collect();
        if let Some(first) = missing.first() {
            return Err(WebStatError::parse_at(
                format!("Missing required column(s): {}", missing.join(", ")),
                1,
                *first,
            ));
        }

        // every lookup below succeeded in the check above
        let at = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            session_id: at("session_id"),
            timestamp: at("timestamp"),
            source: at("source"),
            device: at("device"),
            page: at("page"),
            bounce: at("bounce"),
            conversion: at("conversion"),
            duration: at("duration"),
        })
    }
}

/// Reads a delimited session log into a [`SessionTable`]
#[derive(Debug, Clone)]
pub struct SessionLoader {
    delimiter: u8,
    timestamp_format: Option<String>,
}

impl SessionLoader {
    /// Comma-delimited loader using the built-in timestamp formats
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            timestamp_format: None,
        }
    }

    /// Use a different field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Try `format` before the built-in timestamp formats
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = Some(format.into());
        self
    }

    /// Load the session log at `path`
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<SessionTable> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            let message = match e.kind() {
                io::ErrorKind::NotFound => "Input file not found",
                io::ErrorKind::PermissionDenied => "Input file is not readable",
                _ => "Failed to open input file",
            };
            WebStatError::file_with_source(message, path, e)
        })?;

        let table = self.load_reader(file).map_err(|err| match err {
            WebStatError::Io(e) => {
                WebStatError::file_with_source("Failed to read input file", path, e)
            }
            other => other,
        })?;

        info!(sessions = table.len(), "loaded session log");
        Ok(table)
    }

    /// Load a session log from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<SessionTable> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().map_err(csv_error)?.clone();
        let columns = ColumnIndex::from_headers(&headers)?;
        debug!(columns = headers.len(), "validated header row");

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row.map_err(csv_error)?;
            records.push(self.parse_row(&row, &columns)?);
        }

        let duplicates = count_duplicate_ids(&records);
        if duplicates > 0 {
            warn!(duplicates, "session_id values are not unique");
        }

        Ok(SessionTable::new(records))
    }

    fn parse_row(&self, row: &StringRecord, columns: &ColumnIndex) -> Result<SessionRecord> {
        let line = row.position().map_or(0, csv::Position::line);
        let field = |index: usize| row.get(index).unwrap_or_default();

        let raw_timestamp = field(columns.timestamp);
        let timestamp = parse_timestamp(raw_timestamp, self.timestamp_format.as_deref())
            .ok_or_else(|| {
                WebStatError::parse_at(
                    format!("Unparseable timestamp '{raw_timestamp}' on line {line}"),
                    line,
                    "timestamp",
                )
            })?;

        Ok(SessionRecord {
            session_id: field(columns.session_id).to_string(),
            timestamp,
            source: field(columns.source).to_string(),
            device: field(columns.device).to_string(),
            page: field(columns.page).to_string(),
            bounce: flag_at(field(columns.bounce), line, "bounce")?,
            conversion: flag_at(field(columns.conversion), line, "conversion")?,
            duration: duration_at(field(columns.duration), line)?,
        })
    }
}

impl Default for SessionLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a session timestamp.
///
/// An explicit `format` is tried first. RFC 3339 values keep the wall-clock
/// time of their own offset, and a bare date means midnight.
pub fn parse_timestamp(value: &str, format: Option<&str>) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(format) = format {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts);
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Parse a 0/1 or boolean-like flag
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "t" | "yes" | "y" => Some(true),
        "0" | "0.0" | "false" | "f" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Parse a duration in seconds; an empty cell is a missing value
pub fn parse_duration(value: &str) -> std::result::Result<Option<f64>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        Ok(_) => Err(format!("duration '{value}' is not a finite number")),
        Err(e) => Err(format!("duration '{value}': {e}")),
    }
}

fn flag_at(value: &str, line: u64, column: &str) -> Result<bool> {
    parse_flag(value).ok_or_else(|| {
        WebStatError::parse_at(
            format!("Invalid {column} flag '{value}' on line {line}"),
            line,
            column,
        )
    })
}

fn duration_at(value: &str, line: u64) -> Result<Option<f64>> {
    parse_duration(value).map_err(|msg| {
        WebStatError::parse_at(format!("Invalid {msg} on line {line}"), line, "duration")
    })
}

fn count_duplicate_ids(records: &[SessionRecord]) -> usize {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|r| !seen.insert(r.session_id.as_str()))
        .count()
}

fn csv_error(err: csv::Error) -> WebStatError {
    if err.is_io_error() {
        return match err.into_kind() {
            csv::ErrorKind::Io(e) => WebStatError::Io(e),
            kind => WebStatError::parse(format!("Malformed delimited input: {kind:?}")),
        };
    }
    let line = err.position().map(csv::Position::line);
    WebStatError::parse_with_source("Malformed delimited input", line, err)
}
