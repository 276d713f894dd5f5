//! Session schema and the two table shapes the pipeline passes around

use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// One recorded visit, as read from the session log
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    /// Unique session identifier
    pub session_id: String,
    /// Session start
    pub timestamp: NaiveDateTime,
    /// Referral channel
    pub source: String,
    /// Device class
    pub device: String,
    /// Visited page path
    pub page: String,
    /// Single-page exit flag
    pub bounce: bool,
    /// Goal-completion flag
    pub conversion: bool,
    /// Session length in seconds; `None` when the cell was empty
    pub duration: Option<f64>,
}

/// The table as loaded, before any derived column exists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionTable {
    records: Vec<SessionRecord>,
}

impl SessionTable {
    /// Wrap loaded records
    pub fn new(records: Vec<SessionRecord>) -> Self {
        Self { records }
    }

    /// Number of sessions
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no sessions
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow the records in input order
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Give up ownership of the records
    pub fn into_records(self) -> Vec<SessionRecord> {
        self.records
    }
}

impl From<Vec<SessionRecord>> for SessionTable {
    fn from(records: Vec<SessionRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<SessionRecord> for SessionTable {
    fn from_iter<I: IntoIterator<Item = SessionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A session together with the columns derived from its timestamp.
///
/// `hour` and `date` can only be produced from the record's timestamp, so
/// they never drift from it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSession {
    record: SessionRecord,
    hour: u32,
    date: NaiveDate,
}

impl EnrichedSession {
    /// Derive hour and date from `record.timestamp`
    pub fn from_record(record: SessionRecord) -> Self {
        let hour = record.timestamp.hour();
        let date = record.timestamp.date();
        Self { record, hour, date }
    }

    /// The underlying record
    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// Hour of day, 0-23
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Calendar day of the session start
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Referral channel
    pub fn source(&self) -> &str {
        &self.record.source
    }

    /// Device class
    pub fn device(&self) -> &str {
        &self.record.device
    }

    /// Visited page path
    pub fn page(&self) -> &str {
        &self.record.page
    }

    /// Single-page exit flag
    pub fn bounce(&self) -> bool {
        self.record.bounce
    }

    /// Goal-completion flag
    pub fn conversion(&self) -> bool {
        self.record.conversion
    }

    /// Session length in seconds, if known
    pub fn duration(&self) -> Option<f64> {
        self.record.duration
    }
}

/// The table after the derive step; the input of every aggregate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichedTable {
    rows: Vec<EnrichedSession>,
}

impl EnrichedTable {
    /// Number of sessions
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no sessions
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the rows in input order
    pub fn rows(&self) -> &[EnrichedSession] {
        &self.rows
    }

    /// Iterate over the rows
    pub fn iter(&self) -> std::slice::Iter<'_, EnrichedSession> {
        self.rows.iter()
    }
}

impl FromIterator<EnrichedSession> for EnrichedTable {
    fn from_iter<I: IntoIterator<Item = EnrichedSession>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EnrichedTable {
    type Item = &'a EnrichedSession;
    type IntoIter = std::slice::Iter<'a, EnrichedSession>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
