use chrono::{DateTime, Utc};

use super::utils::{escape_text, fold_line, format_datetime};
use crate::models::event_template::EventTemplate;
use crate::models::occurrence::Occurrence;

const UID_DOMAIN: &str = "meditation-calendar";

/// Calendar holding a template as a (possibly recurring) series.
pub fn template(template: &EventTemplate) -> String {
    let mut ics = calendar_header();
    append_event(&mut ics, template, template.start, &template.id, true);
    ics.push_str("END:VCALENDAR\r\n");
    ics
}

/// Calendar holding a single concrete occurrence.
pub fn occurrence(template: &EventTemplate, occurrence: &Occurrence) -> String {
    let mut ics = calendar_header();
    append_event(&mut ics, template, occurrence.start, &occurrence.composite_id, false);
    ics.push_str("END:VCALENDAR\r\n");
    ics
}

fn calendar_header() -> String {
    let mut ics = String::new();
    ics.push_str("BEGIN:VCALENDAR\r\n");
    ics.push_str("VERSION:2.0\r\n");
    ics.push_str("PRODID:-//Meditation Calendar//EN\r\n");
    ics.push_str("CALSCALE:GREGORIAN\r\n");
    ics
}

fn append_event(
    buffer: &mut String,
    template: &EventTemplate,
    start: DateTime<Utc>,
    uid: &str,
    include_rule: bool,
) {
    let mut push = |line: String| {
        buffer.push_str(&fold_line(&line));
        buffer.push_str("\r\n");
    };

    push("BEGIN:VEVENT".to_string());
    push(format!("UID:{}@{}", uid, UID_DOMAIN));

    let dtstamp = template.created_at.unwrap_or_else(Utc::now);
    push(format!("DTSTAMP:{}", format_datetime(&dtstamp)));
    push(format!("DTSTART:{}", format_datetime(&start)));
    push(format!("DTEND:{}", format_datetime(&(start + template.duration()))));
    push(format!("SUMMARY:{}", escape_text(&template.title)));

    if let Some(desc) = &template.description {
        push(format!("DESCRIPTION:{}", escape_text(desc)));
    }
    if let Some(tradition) = &template.tradition {
        push(format!("CATEGORIES:{}", escape_text(tradition)));
        push(format!("X-MEDITATION-TRADITION:{}", escape_text(tradition)));
    }
    if include_rule {
        if let Some(freq) = template.recurrence.rrule_freq() {
            push(format!("RRULE:FREQ={}", freq));
        }
    }
    if let Some(created) = &template.created_at {
        push(format!("CREATED:{}", format_datetime(created)));
    }

    push("END:VEVENT".to_string());
}
