//! Date parsing and display formatting shared by the adapters.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::FeedError;

/// `Mon D, YYYY`, e.g. `Mar 4, 2025`.
pub const DISPLAY_DATE: &str = "%b %-d, %Y";
/// `H:MM am ZONE` in UTC, e.g. `3:07 pm UTC`.
pub const DISPLAY_TIME: &str = "%-I:%M %P %Z";

/// Parses the timestamp shapes the source APIs emit. Values without an
/// offset are taken as UTC.
///
/// # Errors
///
/// Returns [`FeedError::InvalidDate`] if no known format matches.
pub fn parse_timestamp(context: &str, value: &str) -> Result<DateTime<Utc>, FeedError> {
    let raw = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Some(naive) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }

    Err(FeedError::InvalidDate {
        context: context.to_string(),
        value: value.to_string(),
    })
}

/// Formats a source timestamp as a display date.
///
/// # Errors
///
/// Returns [`FeedError::InvalidDate`] if `value` cannot be parsed.
pub fn display_date(context: &str, value: &str) -> Result<String, FeedError> {
    Ok(parse_timestamp(context, value)?
        .format(DISPLAY_DATE)
        .to_string())
}

/// Like [`display_date`], but a missing or blank value stays `None`.
///
/// # Errors
///
/// Returns [`FeedError::InvalidDate`] if a present value cannot be parsed.
pub fn display_optional_date(
    context: &str,
    value: Option<&str>,
) -> Result<Option<String>, FeedError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => display_date(context, v).map(Some),
        None => Ok(None),
    }
}

/// Formats a source timestamp as a display time of day in UTC.
///
/// # Errors
///
/// Returns [`FeedError::InvalidDate`] if `value` cannot be parsed.
pub fn display_time(context: &str, value: &str) -> Result<String, FeedError> {
    Ok(parse_timestamp(context, value)?
        .format(DISPLAY_TIME)
        .to_string())
}
