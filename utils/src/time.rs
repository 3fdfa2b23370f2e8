//! Timestamp parsing and display.
//!
//! The AppCenter store exports naive `YYYY-MM-DD HH:MM:SS` timestamps whose
//! wall clock is UTC. Parsing therefore assumes UTC unless the input carries
//! an explicit offset; display resolves an IANA zone name at call time.
//! Unparseable input is never an error: it becomes `None` internally and
//! `"-"` in display output.

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use serde_json::Value;

/// Placeholder rendered for values that do not parse as a timestamp.
pub const MISSING_DISPLAY: &str = "-";

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Matches an explicit trailing offset: `Z`, `+HH:MM`, `-HH:MM`, `+HHMM`, `-HHMM`.
fn offset_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:[+-]\d{2}:?\d{2}|Z)$").expect("offset pattern is valid"))
}

/// Parse a loosely-formatted timestamp string into a UTC instant.
///
/// Normalization before the first parse attempt:
/// - leading/trailing whitespace is trimmed; an empty string is `None`
/// - a space-delimited value without a `T` separator has its first space
///   replaced with `T` (database-export shape)
/// - a value without an explicit offset suffix gets `Z` appended
///
/// If the normalized string does not parse, the original input is tried as a
/// naive datetime or bare date (interpreted as UTC). Both failing yields
/// `None`; this function never panics.
#[must_use]
pub fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut adjusted = if trimmed.contains('T') {
        trimmed.to_string()
    } else {
        trimmed.replacen(' ', "T", 1)
    };
    if !offset_suffix().is_match(&adjusted) {
        adjusted.push('Z');
    }

    parse_with_offset(&adjusted).or_else(|| parse_naive_utc(trimmed))
}

fn parse_with_offset(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Offsets without a colon are not RFC 3339 but show up in exported data.
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z")
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn parse_naive_utc(value: &str) -> Option<DateTime<Utc>> {
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Interpret a JSON value as a timestamp.
///
/// Numbers are epoch milliseconds, strings go through [`parse_instant`],
/// anything else is `None`.
#[must_use]
pub fn instant_from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|millis| millis as i64))
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        Value::String(text) => parse_instant(text),
        _ => None,
    }
}

/// Render an instant as `dd/mm/yyyy HH:MM:SS` in the named IANA zone.
///
/// An unknown zone falls back to UTC rendering rather than failing.
#[must_use]
pub fn format_instant(instant: DateTime<Utc>, zone: &str) -> String {
    match Tz::from_str(zone) {
        Ok(tz) => instant.with_timezone(&tz).format(DISPLAY_FORMAT).to_string(),
        Err(_) => {
            tracing::debug!(zone, "unknown timezone, rendering in UTC");
            instant.format(DISPLAY_FORMAT).to_string()
        }
    }
}

/// Render a JSON value as a localized timestamp, or [`MISSING_DISPLAY`].
#[must_use]
pub fn format_value(value: &Value, zone: &str) -> String {
    instant_from_value(value)
        .map_or_else(|| MISSING_DISPLAY.to_string(), |instant| format_instant(instant, zone))
}

/// Coarse relative-time string for `then` as seen from `now`.
///
/// Buckets: seconds under a minute, minutes under an hour, hours under a
/// day, days otherwise. Instants in the future clamp to `"just now"`.
#[must_use]
pub fn relative_from(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds();
    if seconds < 0 {
        return "just now".to_string();
    }
    if seconds < 60 {
        format!("{seconds}s ago")
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86_400)
    }
}

/// Relative-time string for a JSON value, or [`MISSING_DISPLAY`].
#[must_use]
pub fn relative(value: &Value) -> String {
    instant_from_value(value)
        .map_or_else(|| MISSING_DISPLAY.to_string(), |instant| relative_from(instant, Utc::now()))
}
