use chrono::{DateTime, Utc};
use rusqlite::types::Type;

/// Parse an RFC 3339 text column into UTC.
pub(crate) fn utc_from_column(value: String, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
