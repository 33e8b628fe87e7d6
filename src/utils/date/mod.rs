// Date utility functions
// Formatting of UTC instants for people reading them in a local zone

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

/// Format an instant in the display zone, e.g. `Mon 2024-01-01 07:00 CET`.
pub fn format_in_zone(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%a %Y-%m-%d %H:%M %Z")
        .to_string()
}

/// Short wall-clock time in the display zone, e.g. `07:00`.
pub fn time_in_zone(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%H:%M").to_string()
}

/// Rough distance from `now` to `instant`: "in 2h 5m", "3d ago", "now".
pub fn relative_to(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = instant - now;
    if delta.num_minutes() == 0 {
        return "now".to_string();
    }

    let span = describe_span(if delta < Duration::zero() { -delta } else { delta });
    if delta < Duration::zero() {
        format!("{} ago", span)
    } else {
        format!("in {}", span)
    }
}

fn describe_span(span: Duration) -> String {
    let days = span.num_days();
    let hours = span.num_hours() % 24;
    let minutes = span.num_minutes() % 60;

    if days > 0 {
        if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        }
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// `mm:ss` countdown display for the meditation timer.
pub fn clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
