// Property-based tests for next-occurrence calculation and composite ids
// Exercises the real implementations with random anchors and clocks

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use meditation_calendar::models::recurrence::RecurrenceRule;
use meditation_calendar::services::occurrence::{
    decode_occurrence_id, encode_occurrence_id, next_occurrence,
};
use proptest::prelude::*;

const BASE_ID: &str = "3f2b8c1e-9d4a-4e6b-a1f0-7c5d2e8b9a41";

// 2000-01-01 .. 2100-01-01, whole seconds
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..4_102_444_800i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn recurring_rule() -> impl Strategy<Value = RecurrenceRule> {
    prop_oneof![
        Just(RecurrenceRule::Daily),
        Just(RecurrenceRule::Weekly),
        Just(RecurrenceRule::Monthly),
    ]
}

fn period_bound(rule: RecurrenceRule) -> Duration {
    match rule {
        RecurrenceRule::Daily => Duration::days(1),
        RecurrenceRule::Weekly => Duration::days(7),
        // Longest gap between two monthly occurrences (Feb 28 -> Mar 31).
        _ => Duration::days(31),
    }
}

proptest! {
    /// Property: encoding then decoding gives back the same base id and instant
    #[test]
    fn prop_composite_id_round_trip(at in instant(), millis in 0u32..1000) {
        let at = at.with_nanosecond(millis * 1_000_000).unwrap();
        let id = encode_occurrence_id(BASE_ID, at).unwrap();
        let decoded = decode_occurrence_id(&id).unwrap();

        prop_assert_eq!(decoded.base_id, BASE_ID);
        prop_assert_eq!(decoded.occurrence_time, Some(at));
    }

    /// Property: a recurring next occurrence is after now and within one period of it
    #[test]
    fn prop_next_occurrence_is_the_first_after_now(
        reference in instant(),
        now in instant(),
        rule in recurring_rule(),
    ) {
        let next = next_occurrence(reference, rule, now).unwrap();

        if reference > now {
            prop_assert_eq!(next, reference);
        } else {
            prop_assert!(next > now);
            prop_assert!(next - now <= period_bound(rule));
        }
    }

    /// Property: occurrences keep the reference's time of day
    #[test]
    fn prop_time_of_day_is_kept(
        reference in instant(),
        now in instant(),
        rule in recurring_rule(),
    ) {
        let next = next_occurrence(reference, rule, now).unwrap();
        prop_assert_eq!(next.time(), reference.time());
    }

    /// Property: monthly occurrences keep the anchor's day, clamped to month end
    #[test]
    fn prop_monthly_day_is_kept_or_clamped(reference in instant(), now in instant()) {
        let next = next_occurrence(reference, RecurrenceRule::Monthly, now).unwrap();

        if next.day() != reference.day() {
            prop_assert!(next.day() < reference.day());
            let following_day = next + Duration::days(1);
            prop_assert_ne!(following_day.month(), next.month());
        }
    }

    /// Property: weekly occurrences fall on the reference's weekday
    #[test]
    fn prop_weekly_keeps_weekday(reference in instant(), now in instant()) {
        let next = next_occurrence(reference, RecurrenceRule::Weekly, now).unwrap();
        prop_assert_eq!(next.weekday(), reference.weekday());
    }

    /// Property: one-time events never move
    #[test]
    fn prop_one_time_reference_is_unchanged(reference in instant(), now in instant()) {
        prop_assert_eq!(next_occurrence(reference, RecurrenceRule::None, now).unwrap(), reference);
    }
}
