//! Composite occurrence ids: `<uuid>-<timestamp>`.
//!
//! The base id is a hyphenated UUID (5 dash-separated segments) and the
//! timestamp is RFC 3339, which has dashes of its own. Decoding therefore
//! takes the first 5 segments as the base id and everything after them as
//! the timestamp.

use chrono::{DateTime, Datelike, SecondsFormat, Timelike, Utc};

use super::error::{OccurrenceError, OccurrenceResult};
use crate::models::event_template::is_hyphenated_uuid;
use crate::models::occurrence::OccurrenceRef;

const DELIMITER: char = '-';
const BASE_ID_SEGMENTS: usize = 5;

/// Years whose RFC 3339 form has exactly four unsigned digits. Other years
/// are written with a sign and would not decode.
const ENCODABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Encode a template id and one occurrence time into a composite id.
///
/// Fails with [`OccurrenceError::OccurrenceOutOfRange`] for times outside
/// years 0000 to 9999, which have no decodable RFC 3339 form.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use meditation_calendar::services::occurrence::encode_occurrence_id;
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
/// let id = encode_occurrence_id("3f2b8c1e-9d4a-4e6b-a1f0-7c5d2e8b9a41", at).unwrap();
/// assert_eq!(id, "3f2b8c1e-9d4a-4e6b-a1f0-7c5d2e8b9a41-2024-01-01T06:00:00.000Z");
/// ```
pub fn encode_occurrence_id(base_id: &str, occurrence_time: DateTime<Utc>) -> OccurrenceResult<String> {
    if !is_hyphenated_uuid(base_id) {
        return Err(OccurrenceError::InvalidBaseId(base_id.to_string()));
    }
    if !ENCODABLE_YEARS.contains(&occurrence_time.year()) {
        return Err(OccurrenceError::OccurrenceOutOfRange);
    }

    Ok(format!(
        "{}{}{}",
        base_id,
        DELIMITER,
        serialize_timestamp(occurrence_time)
    ))
}

/// Split a composite id back into its base id and occurrence time.
///
/// Ids with 5 or fewer segments are bare template ids and decode with no
/// occurrence time.
pub fn decode_occurrence_id(composite_id: &str) -> OccurrenceResult<OccurrenceRef> {
    let segments: Vec<&str> = composite_id.split(DELIMITER).collect();

    if segments.len() <= BASE_ID_SEGMENTS {
        return Ok(OccurrenceRef {
            base_id: composite_id.to_string(),
            occurrence_time: None,
        });
    }

    let separator = DELIMITER.to_string();
    let base_id = segments[..BASE_ID_SEGMENTS].join(&separator);
    let suffix = segments[BASE_ID_SEGMENTS..].join(&separator);

    let occurrence_time = DateTime::parse_from_rfc3339(&suffix)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| OccurrenceError::MalformedOccurrenceId {
            id: composite_id.to_string(),
            suffix,
        })?;

    Ok(OccurrenceRef {
        base_id,
        occurrence_time: Some(occurrence_time),
    })
}

/// Fixed-width UTC form. Millisecond precision matches what mobile clients
/// emit; nanoseconds are written only when present so decoding is exact.
fn serialize_timestamp(time: DateTime<Utc>) -> String {
    let format = if time.nanosecond() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::Nanos
    };
    time.to_rfc3339_opts(format, true)
}
