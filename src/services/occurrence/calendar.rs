use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use super::error::{OccurrenceError, OccurrenceResult};

/// Number of days in `month` of `year`.
pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

/// Month index counted from year 0, used to measure whole-month distances.
pub(crate) fn month_index(dt: DateTime<Utc>) -> i64 {
    i64::from(dt.year()) * 12 + i64::from(dt.month0())
}

/// Advance `anchor` by `months` calendar months, keeping its time of day.
///
/// The anchor's day-of-month is clamped to the last day of a shorter target
/// month (Jan 31 + 1 month = Feb 28/29), never rolled into the month after.
pub(crate) fn add_months(anchor: DateTime<Utc>, months: u64) -> OccurrenceResult<DateTime<Utc>> {
    let months = i64::try_from(months).map_err(|_| OccurrenceError::OccurrenceOutOfRange)?;
    let target = month_index(anchor)
        .checked_add(months)
        .ok_or(OccurrenceError::OccurrenceOutOfRange)?;

    let year = i32::try_from(target.div_euclid(12))
        .map_err(|_| OccurrenceError::OccurrenceOutOfRange)?;
    let month = target.rem_euclid(12) as u32 + 1;

    let last_day = days_in_month(year, month).ok_or(OccurrenceError::OccurrenceOutOfRange)?;
    let day = anchor.day().min(last_day);

    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(anchor.time()).and_utc())
        .ok_or(OccurrenceError::OccurrenceOutOfRange)
}

/// `anchor + period * steps` without overflowing.
pub(crate) fn add_periods(
    anchor: DateTime<Utc>,
    period: Duration,
    steps: u64,
) -> OccurrenceResult<DateTime<Utc>> {
    let steps = i32::try_from(steps).map_err(|_| OccurrenceError::OccurrenceOutOfRange)?;
    period
        .checked_mul(steps)
        .and_then(|offset| anchor.checked_add_signed(offset))
        .ok_or(OccurrenceError::OccurrenceOutOfRange)
}
