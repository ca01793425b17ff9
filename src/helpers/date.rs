//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// Shown when a post has no publish date
pub const DATE_UNAVAILABLE: &str = "Date unavailable";

/// Shown when a publish date cannot be parsed
pub const INVALID_DATE: &str = "Invalid date";

/// Default display format (like "January 1, 2024")
pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

/// Format a stored publish date for display.
///
/// Never fails: a missing date and an unparseable date both map to a
/// sentinel string.
///
/// # Examples
/// ```ignore
/// format_date(Some("2024-01-01"), "%B %-d, %Y") // -> "January 1, 2024"
/// ```
pub fn format_date(date: Option<&str>, format: &str) -> String {
    let date = match date.map(str::trim) {
        Some(d) if !d.is_empty() => d,
        _ => return DATE_UNAVAILABLE.to_string(),
    };

    let Some(parsed) = parse_date_string(date) else {
        tracing::warn!("Error formatting date, value: {:?}", date);
        return INVALID_DATE.to_string();
    };

    let mut out = String::new();
    if write!(out, "{}", parsed.format(format)).is_err() {
        tracing::warn!("Invalid date format {:?}", format);
        return INVALID_DATE.to_string();
    }
    out
}

/// Parse a date string in various formats.
///
/// Offsets are honoured and the result is expressed in UTC.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    // RFC 3339 / ISO 8601 with offset, as stored by the CMS
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f%:z",
        "%Y-%m-%dT%H:%M%:z",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    for fmt in formats {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_utc());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}
