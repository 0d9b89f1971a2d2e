//! Data conversion utilities for workout export
//!
//! Contains the unit conversions applied when resampled raw values are
//! emitted as track points, timestamp formatting for the exporters, and the
//! activity-type classification used to label exported tracks.

use std::fmt;

/// Raw coordinates are stored as degrees * 10^8
const COORDINATE_SCALE: f64 = 100_000_000.0;
/// Raw altitude is stored as centimeters
const ALTITUDE_SCALE: f64 = 100.0;

/// Convert a raw coordinate to degrees
pub fn convert_coordinate(raw_value: i64) -> f64 {
    raw_value as f64 / COORDINATE_SCALE
}

/// Convert raw altitude to meters
pub fn convert_altitude(raw_value: i64) -> f64 {
    raw_value as f64 / ALTITUDE_SCALE
}

/// Activity classification reported in the workout summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutType {
    Run,
    Hike,
    Ride,
    Unknown(i64),
}

impl WorkoutType {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => WorkoutType::Run,
            6 => WorkoutType::Hike,
            9 => WorkoutType::Ride,
            other => WorkoutType::Unknown(other),
        }
    }

    /// Label written to the GPX `<type>` element, `None` when unclassified
    pub fn label(&self) -> Option<&'static str> {
        match self {
            WorkoutType::Run => Some("run"),
            WorkoutType::Hike => Some("hike"),
            WorkoutType::Ride => Some("ride"),
            WorkoutType::Unknown(_) => None,
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutType::Unknown(code) => write!(f, "unknown ({})", code),
            known => f.write_str(known.label().unwrap_or_default()),
        }
    }
}

// ============================================================================
// Timestamp formatting (for GPX/CSV/GeoJSON export)
// ============================================================================

/// Last second of 9999-12-31, the latest time a four-digit year can show
const MAX_EPOCH_SECONDS: i64 = 253_402_300_799;

fn clamp_epoch(epoch_seconds: i64) -> u64 {
    epoch_seconds.clamp(0, MAX_EPOCH_SECONDS) as u64
}

/// Format epoch seconds as ISO 8601 UTC without a zone suffix,
/// e.g. `2019-10-16T13:42:47`. Times outside 1970..=9999 clamp to the range.
pub fn format_timestamp(epoch_seconds: i64) -> String {
    let secs = clamp_epoch(epoch_seconds);

    let secs_per_minute = 60u64;
    let secs_per_hour = 3600u64;
    let secs_per_day = 86400u64;

    let time_of_day = secs % secs_per_day;
    let hours = time_of_day / secs_per_hour;
    let minutes = (time_of_day % secs_per_hour) / secs_per_minute;
    let seconds = time_of_day % secs_per_minute;

    let (year, month, day) = days_to_ymd(secs / secs_per_day);

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year, month, day, hours, minutes, seconds
    )
}

/// Calendar date part of [`format_timestamp`]
pub fn format_date(epoch_seconds: i64) -> String {
    let secs = clamp_epoch(epoch_seconds);
    let (year, month, day) = days_to_ymd(secs / 86400);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Convert days since Unix epoch to year/month/day
fn days_to_ymd(days: u64) -> (u32, u32, u32) {
    let mut remaining_days = days as i64;
    let mut year = 1970u32;

    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let mut days_in_month = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if is_leap_year(year) {
        days_in_month[2] = 29;
    }

    let mut month = 1u32;
    for (m, &days) in days_in_month.iter().enumerate().skip(1) {
        if remaining_days < days as i64 {
            month = m as u32;
            break;
        }
        remaining_days -= days as i64;
    }

    let day = (remaining_days + 1) as u32;

    (year, month, day)
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
