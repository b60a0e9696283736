//! ISO-8601 timestamp parsing for meeting and hearing dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601 timestamp into a UTC instant.
///
/// A trailing `Z` or a numeric offset is honoured; timestamps without an
/// offset are taken as UTC and a bare date means midnight UTC. Returns `None`
/// for anything else.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    // RFC 3339 parsing above covers `Z`; the remaining formats use `%:z`.
    let with_offset = match text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    };
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Re-renders a timestamp as UTC ISO-8601 with a `Z` suffix.
///
/// Unparseable input is returned unchanged; empty input stays empty.
pub fn to_utc_iso(text: &str) -> String {
    match parse_timestamp(text) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        None => text.to_string(),
    }
}
