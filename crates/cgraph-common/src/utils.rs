//! Shared utility functions for dates, numbers, and markup text.

use crate::error::{GraphError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parses an ISO-8601 date or date-time string into a UTC timestamp.
///
/// Accepts RFC 3339 strings with an offset, naive date-times (treated as UTC),
/// and bare calendar dates (midnight UTC).
pub fn parse_iso_date(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| GraphError::InvalidDateFormat(input.to_string()))
}

/// Converts a timestamp to fractional epoch milliseconds.
#[allow(clippy::cast_precision_loss)]
pub fn to_epoch_millis(timestamp: DateTime<Utc>) -> f64 {
    timestamp.timestamp_millis() as f64
}

/// Converts fractional epoch milliseconds back to a timestamp.
#[allow(clippy::cast_possible_truncation)]
pub fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// Formats a timestamp for display.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Formats a number for tick labels, dropping insignificant trailing zeros.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let text = format!("{value:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Formats a pixel coordinate for SVG attributes.
pub fn format_px(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format_number(rounded)
}

/// Escapes text for safe inclusion in SVG/HTML markup.
pub fn escape_markup(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
