// Unit tests for composite occurrence ids and recurrence rule parsing
// Parameterized over the documented examples

use chrono::{DateTime, TimeZone, Utc};
use meditation_calendar::models::recurrence::RecurrenceRule;
use meditation_calendar::services::occurrence::{
    decode_occurrence_id, encode_occurrence_id, next_occurrence, OccurrenceError,
};
use pretty_assertions::assert_eq;
use test_case::test_case;

const BASE_ID: &str = "3f2b8c1e-9d4a-4e6b-a1f0-7c5d2e8b9a41";

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

#[test]
fn test_encode_uses_millisecond_utc_form() {
    assert_eq!(
        encode_occurrence_id(BASE_ID, at(2024, 1, 1, 6)).unwrap(),
        format!("{BASE_ID}-2024-01-01T06:00:00.000Z")
    );
}

#[test_case("2024-01-01T06:00:00.000Z", at(2024, 1, 1, 6) ; "utc millis")]
#[test_case("2024-01-01T06:00:00Z", at(2024, 1, 1, 6) ; "utc seconds")]
#[test_case("2024-01-01T07:00:00+01:00", at(2024, 1, 1, 6) ; "offset is normalized")]
fn test_decode_timestamp_forms(suffix: &str, expected: DateTime<Utc>) {
    let decoded = decode_occurrence_id(&format!("{BASE_ID}-{suffix}")).unwrap();
    assert_eq!(decoded.base_id, BASE_ID);
    assert_eq!(decoded.occurrence_time, Some(expected));
}

#[test]
fn test_bare_id_decodes_without_time() {
    let decoded = decode_occurrence_id(BASE_ID).unwrap();
    assert_eq!(decoded.base_id, BASE_ID);
    assert_eq!(decoded.occurrence_time, None);
}

#[test_case("not-a-timestamp" ; "words")]
#[test_case("2024-13-01T06:00:00Z" ; "month out of range")]
#[test_case("2024-01-01" ; "date only")]
fn test_malformed_suffix_is_rejected(suffix: &str) {
    let id = format!("{BASE_ID}-{suffix}");
    let err = decode_occurrence_id(&id).unwrap_err();
    assert!(matches!(err, OccurrenceError::MalformedOccurrenceId { .. }));
}

#[test_case("event-42" ; "short slug")]
#[test_case("3f2b8c1e9d4a4e6ba1f07c5d2e8b9a41" ; "simple uuid")]
#[test_case("" ; "empty")]
fn test_non_uuid_base_id_cannot_be_encoded(base_id: &str) {
    assert_eq!(
        encode_occurrence_id(base_id, at(2024, 1, 1, 6)).unwrap_err(),
        OccurrenceError::InvalidBaseId(base_id.to_string())
    );
}

#[test_case(RecurrenceRule::Daily, at(2024, 1, 5, 0), at(2024, 1, 5, 6) ; "daily")]
#[test_case(RecurrenceRule::Weekly, at(2024, 1, 10, 0), at(2024, 1, 15, 6) ; "weekly")]
#[test_case(RecurrenceRule::Monthly, at(2024, 1, 10, 0), at(2024, 2, 1, 6) ; "monthly")]
#[test_case(RecurrenceRule::None, at(2024, 1, 10, 0), at(2024, 1, 1, 6) ; "one time")]
fn test_next_occurrence_from_jan_first(
    rule: RecurrenceRule,
    now: DateTime<Utc>,
    expected: DateTime<Utc>,
) {
    assert_eq!(next_occurrence(at(2024, 1, 1, 6), rule, now).unwrap(), expected);
}

#[test]
fn test_next_occurrence_id_round_trips() {
    let next = next_occurrence(at(2024, 1, 31, 6), RecurrenceRule::Monthly, at(2024, 2, 15, 0))
        .unwrap();
    let id = encode_occurrence_id(BASE_ID, next).unwrap();

    assert_eq!(id, format!("{BASE_ID}-2024-02-29T06:00:00.000Z"));
    assert_eq!(decode_occurrence_id(&id).unwrap().occurrence_time, Some(next));
}

#[test_case("daily", RecurrenceRule::Daily ; "lowercase")]
#[test_case(" Weekly ", RecurrenceRule::Weekly ; "padded")]
#[test_case("MONTHLY", RecurrenceRule::Monthly ; "uppercase")]
fn test_rule_parsing(text: &str, expected: RecurrenceRule) {
    assert_eq!(text.parse::<RecurrenceRule>().unwrap(), expected);
}

#[test]
fn test_unknown_rule_is_rejected() {
    assert_eq!(
        "yearly".parse::<RecurrenceRule>().unwrap_err(),
        OccurrenceError::UnknownRecurrenceRule("yearly".to_string())
    );
    assert_eq!(
        "  ".parse::<RecurrenceRule>().unwrap_err(),
        OccurrenceError::UnknownRecurrenceRule("  ".to_string())
    );
}
