//! Pure transforms from raw rows to display-ready series and aggregates.
//!
//! Nothing in this module touches the database. Every function is a
//! deterministic mapping over already-fetched rows, so the view layer can
//! recompute its models on every selection change.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::error::{ParseError, ParseResult};
use crate::types::{SensorLog, WeatherSuggestion};

/// Parse a driver-native timestamp into a canonical [`OffsetDateTime`].
///
/// Accepts RFC 3339 (`2024-05-01T06:30:00Z`) or the plain SQL form
/// (`2024-05-01 06:30:00`, assumed UTC).
pub fn parse_timestamp(raw: &str) -> ParseResult<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(ts);
    }

    let sql = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    PrimitiveDateTime::parse(raw, &sql)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| ParseError::InvalidTimestamp(raw.to_string()))
}

/// Parse a driver-native date into a [`Date`].
///
/// Accepts `2024-05-01`; falls back to the timestamp formats and takes
/// the calendar date.
pub fn parse_date(raw: &str) -> ParseResult<Date> {
    let raw = raw.trim();
    let iso = format_description!("[year]-[month]-[day]");
    if let Ok(date) = Date::parse(raw, &iso) {
        return Ok(date);
    }

    parse_timestamp(raw)
        .map(|ts| ts.date())
        .map_err(|_| ParseError::InvalidDate(raw.to_string()))
}

/// Normalize a raw irrigation status or suggested action to canonical text.
///
/// Trims surrounding whitespace and upper-cases. Idempotent.
///
/// # Example
///
/// ```
/// use agrodash_types::transform::normalize_status;
///
/// assert_eq!(normalize_status(" on "), "ON");
/// assert_eq!(normalize_status("Standby"), "STANDBY");
/// ```
pub fn normalize_status(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Map a normalized status to its numeric chart weight.
///
/// `"ON"` is 1; anything else, including unrecognized states, is 0.
pub fn status_weight(status: &str) -> u8 {
    if status == "ON" { 1 } else { 0 }
}

/// Arithmetic mean, or `None` for an empty slice.
///
/// The `None` is deliberate: an empty series must render as an explicit
/// "no data" gauge state, never as a plausible-looking zero.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Map sensor rows to a binary irrigation series, preserving row order.
///
/// The output has exactly one `(timestamp, 0|1)` point per input row.
pub fn status_series(rows: &[SensorLog]) -> Vec<(OffsetDateTime, u8)> {
    rows.iter()
        .map(|row| (row.log_timestamp, status_weight(&row.irrigation_status)))
        .collect()
}

/// Count suggestion rows by suggested action.
///
/// Keys appear in first-occurrence order so repeated runs over the same
/// rows produce identical output.
pub fn action_frequency(rows: &[WeatherSuggestion]) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for row in rows {
        match counts
            .iter_mut()
            .find(|(action, _)| *action == row.suggested_action)
        {
            Some((_, n)) => *n += 1,
            None => counts.push((row.suggested_action.clone(), 1)),
        }
    }
    counts
}
