//! Derived hour and date columns

use crate::record::{EnrichedSession, EnrichedTable, SessionTable};
use tracing::debug;

/// Consume the loaded table and return it with `hour` and `date` attached.
pub fn derive_columns(table: SessionTable) -> EnrichedTable {
    let enriched: EnrichedTable = table
        .into_records()
        .into_iter()
        .map(EnrichedSession::from_record)
        .collect();

    debug!(rows = enriched.len(), "derived hour and date columns");
    enriched
}
