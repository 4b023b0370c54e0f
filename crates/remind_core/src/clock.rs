//! Time conversion helpers for reminder display and editing.
//!
//! # Responsibility
//! - Render epoch-millisecond instants as short local-time text.
//! - Convert between instants and local hour/minute picker components.
//!
//! # Invariants
//! - Conversions apply the local timezone at call time; nothing about the
//!   timezone is persisted.
//! - Picking a wall-clock time earlier than "now" lands on the next day,
//!   never in the past.

use chrono::{DateTime, Local, Timelike};

const DISPLAY_FORMAT: &str = "%b %d %-I:%M%p";
const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Renders an instant as short local-time text, e.g. `Aug 06 5:04PM`.
pub fn to_text(time_ms: i64) -> String {
    match to_local(time_ms) {
        Some(local) => local.format(DISPLAY_FORMAT).to_string(),
        None => format!("invalid time {time_ms}"),
    }
}

/// Local hour of day (0-23) for the given instant, used to seed pickers.
pub fn hour_of_day(time_ms: i64) -> u32 {
    to_local(time_ms).map_or(0, |local| local.hour())
}

/// Local minute (0-59) for the given instant, used to seed pickers.
pub fn minute_of_hour(time_ms: i64) -> u32 {
    to_local(time_ms).map_or(0, |local| local.minute())
}

/// Converts a picked wall-clock time to an instant today or tomorrow.
///
/// A time of day earlier than now rolls over to the following day.
pub fn from_hour_minute(hour: u32, minute: u32) -> i64 {
    from_hour_minute_at(hour, minute, Local::now())
}

/// Default schedule for a brand-new reminder: one hour from now.
pub fn default_reminder_time() -> i64 {
    Local::now().timestamp_millis() + HOUR_MS
}

fn to_local(time_ms: i64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp_millis(time_ms).map(|utc| utc.with_timezone(&Local))
}

fn from_hour_minute_at(hour: u32, minute: u32, now: DateTime<Local>) -> i64 {
    let now_ms = now.timestamp_millis();
    let candidate = now
        .with_hour(hour)
        .and_then(|at_hour| at_hour.with_minute(minute))
        .and_then(|at_minute| at_minute.with_second(0))
        .and_then(|at_second| at_second.with_nanosecond(0));

    match candidate {
        Some(picked) => {
            let mut picked_ms = picked.timestamp_millis();
            if picked_ms < now_ms {
                picked_ms += DAY_MS;
            }
            picked_ms
        }
        // Unrepresentable local wall-clock time (DST gap).
        None => now_ms,
    }
}
