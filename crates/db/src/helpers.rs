use chrono::{DateTime, SecondsFormat, Utc};
use quota_core::{PlanTier, RecordSource, Tenant};
use rusqlite::Row;

use crate::error::Result;

pub(crate) fn table_for(source: RecordSource) -> &'static str {
    match source {
        RecordSource::Transactions => "bank_transaction",
        RecordSource::ReceiptTrips => "receipt_trip",
    }
}

/// Stored timestamps are UTC with millisecond precision so that text order
/// matches time order.
pub(crate) fn normalize_ts(value: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(value.trim())?;
    Ok(parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub(crate) fn parse_ts(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

pub(crate) fn now_ts() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn row_to_tenant(row: &Row<'_>) -> std::result::Result<Tenant, rusqlite::Error> {
    Ok(Tenant {
        id: row.get(0)?,
        plan: PlanTier::new(row.get::<_, String>(1)?),
        created_at: row.get(2)?,
    })
}
