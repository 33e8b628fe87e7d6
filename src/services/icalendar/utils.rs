use chrono::{DateTime, Utc};

pub(super) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

pub(super) fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

/// Fold a content line at 75 octets, as RFC 5545 requires.
pub(super) fn fold_line(line: &str) -> String {
    const LIMIT: usize = 75;

    let mut folded = String::with_capacity(line.len() + line.len() / LIMIT * 3);
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > LIMIT {
            folded.push_str("\r\n ");
            width = 1;
        }
        folded.push(ch);
        width += len;
    }
    folded
}
