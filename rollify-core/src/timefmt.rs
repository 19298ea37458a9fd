//! Parsing and formatting of the stored Unix timestamps.

use chrono::{DateTime, TimeZone, Utc};

use crate::GlueError;

/// Parse the `unix-ts` attribute value (integer seconds, base 10).
pub fn parse_unix_ts(raw: &str) -> Result<DateTime<Utc>, GlueError> {
    let seconds: i64 = raw
        .trim()
        .parse()
        .map_err(|_| GlueError::InvalidTimestamp(raw.to_string()))?;

    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or(GlueError::TimestampOutOfRange(seconds))
}

/// Absolute form shown in the tooltip.
pub fn format_absolute(ts: DateTime<Utc>) -> String {
    ts.format("%Y/%m/%d %H:%M").to_string()
}

/// Relative phrase shown as the element text, e.g. "3 minutes ago".
///
/// `now` is passed in rather than sampled here so a render pass is
/// deterministic for a fixed wall-clock instant.
pub fn format_relative(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(ts);
    let future = delta.num_seconds() < 0;
    let delta = delta.abs();

    let phrase = if delta.num_days() >= 1 {
        count_unit(delta.num_days(), "day")
    } else if delta.num_hours() >= 1 {
        count_unit(delta.num_hours(), "hour")
    } else if delta.num_minutes() >= 1 {
        count_unit(delta.num_minutes(), "minute")
    } else if future {
        return "in a few seconds".to_string();
    } else {
        return "a few seconds ago".to_string();
    };

    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn count_unit(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
