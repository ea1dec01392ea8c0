//! Tolerant timestamp decoding for API payloads.
//!
//! The backend does not serialize dates the same way on every endpoint, so
//! each wire timestamp is tried against an ordered list of formats and the
//! first successful parse wins. Adding a format means adding a row to
//! [`DATE_FORMATS`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// A single parse attempt; `None` means "not this format".
pub type DateParser = fn(&str) -> Option<DateTime<Utc>>;

/// Accepted timestamp formats in priority order.
pub const DATE_FORMATS: &[(&str, DateParser)] = &[
    ("ISO-8601 with fractional seconds", parse_internet_fractional),
    ("ISO-8601", parse_internet),
    ("yyyy-MM-ddTHH:mm:ss", parse_naive_t),
    ("yyyy-MM-dd HH:mm:ss", parse_naive_space),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported date: {0}")]
pub struct DateParseError(pub String);

/// Parse a wire timestamp using the first matching format.
pub fn parse_tolerant(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    DATE_FORMATS
        .iter()
        .find_map(|(_, parse)| parse(raw))
        .ok_or_else(|| DateParseError(raw.to_string()))
}

/// Serde adapter: `#[serde(deserialize_with = "dates::deserialize")]`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_tolerant(&raw).map_err(serde::de::Error::custom)
}

fn has_fractional_seconds(raw: &str) -> bool {
    raw.find(['T', 't'])
        .is_some_and(|time_start| raw[time_start..].contains('.'))
}

fn parse_internet_fractional(raw: &str) -> Option<DateTime<Utc>> {
    if !has_fractional_seconds(raw) {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn parse_internet(raw: &str) -> Option<DateTime<Utc>> {
    if has_fractional_seconds(raw) {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

// Offset-less formats are interpreted as UTC.
fn parse_naive_t(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_naive_space(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
