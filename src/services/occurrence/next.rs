//! Next-occurrence calculation for recurring templates.
//!
//! Every occurrence is computed from the reference anchor as
//! `reference + k periods`, so long-dead templates resolve in constant time
//! and monthly series never drift after passing through a short month.

use chrono::{DateTime, Duration, Utc};

use super::calendar::{add_months, add_periods, month_index};
use super::error::OccurrenceResult;
use crate::models::recurrence::RecurrenceRule;

/// Soonest occurrence of `rule` that is strictly after `now`.
///
/// A `reference` already in the future is returned unchanged, as is any
/// reference for [`RecurrenceRule::None`]; callers detect an ended one-time
/// event by comparing the result with `now`.
pub fn next_occurrence(
    reference: DateTime<Utc>,
    rule: RecurrenceRule,
    now: DateTime<Utc>,
) -> OccurrenceResult<DateTime<Utc>> {
    let index = first_index_after(reference, rule, now)?;
    nth_occurrence(reference, rule, index)
}

/// [`next_occurrence`] relative to the current instant.
pub fn next_occurrence_from_now(
    reference: DateTime<Utc>,
    rule: RecurrenceRule,
) -> OccurrenceResult<DateTime<Utc>> {
    next_occurrence(reference, rule, Utc::now())
}

/// Forward sequence of occurrences starting at
/// `next_occurrence(reference, rule, now)`.
///
/// One-time rules yield the reference exactly once.
pub fn occurrences_from(
    reference: DateTime<Utc>,
    rule: RecurrenceRule,
    now: DateTime<Utc>,
) -> OccurrenceResult<Occurrences> {
    Ok(Occurrences {
        anchor: reference,
        rule,
        next_index: Some(first_index_after(reference, rule, now)?),
    })
}

/// Iterator over computed occurrence start times. Stops at the end of the
/// representable date range.
#[derive(Debug, Clone)]
pub struct Occurrences {
    anchor: DateTime<Utc>,
    rule: RecurrenceRule,
    next_index: Option<u64>,
}

impl Iterator for Occurrences {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_index?;
        let occurrence = nth_occurrence(self.anchor, self.rule, index).ok();

        self.next_index = match (self.rule, occurrence) {
            (RecurrenceRule::None, _) | (_, None) => None,
            _ => index.checked_add(1),
        };

        occurrence
    }
}

fn fixed_period(rule: RecurrenceRule) -> Option<Duration> {
    match rule {
        RecurrenceRule::Daily => Some(Duration::days(1)),
        RecurrenceRule::Weekly => Some(Duration::days(7)),
        RecurrenceRule::None | RecurrenceRule::Monthly => None,
    }
}

/// Occurrence `index` of the series anchored at `anchor`.
fn nth_occurrence(
    anchor: DateTime<Utc>,
    rule: RecurrenceRule,
    index: u64,
) -> OccurrenceResult<DateTime<Utc>> {
    match (rule, fixed_period(rule)) {
        (RecurrenceRule::None, _) => Ok(anchor),
        (_, Some(period)) => add_periods(anchor, period, index),
        (_, None) => add_months(anchor, index),
    }
}

/// Smallest index whose occurrence is strictly after `now` (0 when the
/// reference itself is upcoming or the rule does not repeat).
fn first_index_after(
    reference: DateTime<Utc>,
    rule: RecurrenceRule,
    now: DateTime<Utc>,
) -> OccurrenceResult<u64> {
    if reference > now || !rule.is_recurring() {
        return Ok(0);
    }

    // Estimate from whole periods elapsed; the estimate is never past the
    // answer, so at most a couple of corrective steps follow.
    let mut index = match fixed_period(rule) {
        Some(period) => {
            let elapsed = (now - reference).num_seconds();
            u64::try_from(elapsed / period.num_seconds()).unwrap_or(0)
        }
        None => u64::try_from(month_index(now) - month_index(reference)).unwrap_or(0),
    };

    while nth_occurrence(reference, rule, index)? <= now {
        index += 1;
    }

    Ok(index)
}
