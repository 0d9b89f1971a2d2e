use crate::conversion::{convert_altitude, convert_coordinate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decoded, still unscaled sample streams of one workout
///
/// The three time axes (`times`, `hrtimes`, `steptimes`) hold per-sample
/// deltas. `lat`, `lon` and `hr` are delta-encoded as well, while `alt`,
/// `stride` and `cadence` are absolute.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawTrackData {
    /// Epoch seconds
    pub start_time: i64,
    pub end_time: i64,
    /// Time budget for gap compression, in seconds
    pub cost_time: i64,
    pub distance: f64,
    pub times: Vec<i64>,
    /// Degrees * 1e8
    pub lat: Vec<i64>,
    /// Degrees * 1e8
    pub lon: Vec<i64>,
    /// Meters * 1e2
    pub alt: Vec<i64>,
    pub hrtimes: Vec<i64>,
    pub hr: Vec<i64>,
    pub steptimes: Vec<i64>,
    pub stride: Vec<i64>,
    pub cadence: Vec<i64>,
}

impl RawTrackData {
    /// A workout without position samples has no usable track
    pub fn has_position_data(&self) -> bool {
        !self.lat.is_empty()
    }
}

/// Position in physical units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// Degrees
    pub lat: f64,
    /// Degrees
    pub lon: f64,
    /// Meters
    pub alt: f64,
}

impl Position {
    pub fn from_raw(lat_raw: i64, lon_raw: i64, alt_raw: i64) -> Self {
        Self {
            lat: convert_coordinate(lat_raw),
            lon: convert_coordinate(lon_raw),
            alt: convert_altitude(alt_raw),
        }
    }
}

/// One resampled sample on the master timeline
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackPoint {
    /// Seconds since workout start
    pub time: i64,
    /// Epoch seconds (`start_time + time`)
    pub timestamp: i64,
    pub position: Position,
    pub heart_rate: i64,
    pub stride: i64,
    pub cadence: i64,
}
