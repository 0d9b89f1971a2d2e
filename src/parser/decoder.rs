//! Stream decoding
//!
//! Turns a summary/detail record pair into [`RawTrackData`]. Values are
//! decoded verbatim: cumulative sums and gap filling happen later, in the
//! resampler, so the raw arrays here still hold deltas where the encoding
//! uses them.

use crate::error::Result;
use crate::parser::helpers::{parse_value, split_segments, sub_value};
use crate::types::{RawTrackData, WorkoutDetail, WorkoutSummary};
use tracing::debug;

// Field names as they appear in the detail record
pub const FIELD_TIME: &str = "time";
pub const FIELD_POSITION: &str = "longitude_latitude";
pub const FIELD_ALTITUDE: &str = "altitude";
pub const FIELD_HEART_RATE: &str = "heart_rate";
pub const FIELD_GAIT: &str = "gait";

// Sub-value indices within a sample group
const POSITION_LAT: usize = 0;
const POSITION_LON: usize = 1;
const HEART_RATE_TIME: usize = 0;
const HEART_RATE_VALUE: usize = 1;
const GAIT_TIME: usize = 0;
const GAIT_STRIDE: usize = 2;
const GAIT_CADENCE: usize = 3;

/// Decode a field holding one integer per sample group
pub fn decode_scalar_stream(field: &'static str, encoded: Option<&str>) -> Result<Vec<i64>> {
    split_segments(encoded)
        .map(|segment| parse_value(field, segment))
        .collect()
}

/// Decode one sub-value of every sample group in a field
pub fn decode_sub_stream(
    field: &'static str,
    encoded: Option<&str>,
    index: usize,
) -> Result<Vec<i64>> {
    split_segments(encoded)
        .map(|segment| parse_value(field, sub_value(field, segment, index)?))
        .collect()
}

/// Decode heart-rate time deltas
///
/// An empty or zero delta is read as 1 second so the heart-rate axis always
/// moves forward. Same-timestamp samples therefore never survive decoding.
pub fn decode_heart_rate_times(encoded: Option<&str>) -> Result<Vec<i64>> {
    split_segments(encoded)
        .map(|segment| {
            let token = sub_value(FIELD_HEART_RATE, segment, HEART_RATE_TIME)?;
            if token.trim().is_empty() {
                return Ok(1);
            }
            match parse_value(FIELD_HEART_RATE, token)? {
                0 => Ok(1),
                delta => Ok(delta),
            }
        })
        .collect()
}

/// Decode a workout's summary and detail records into raw sample streams
pub fn decode_track_data(summary: &WorkoutSummary, detail: &WorkoutDetail) -> Result<RawTrackData> {
    let position = detail.longitude_latitude.as_deref();
    let heart_rate = detail.heart_rate.as_deref();
    let gait = detail.gait.as_deref();

    let data = RawTrackData {
        start_time: summary.start_time()?,
        end_time: summary.end_time()?,
        cost_time: summary.cost_time()?,
        distance: summary.distance()?,
        times: decode_scalar_stream(FIELD_TIME, detail.time.as_deref())?,
        lat: decode_sub_stream(FIELD_POSITION, position, POSITION_LAT)?,
        lon: decode_sub_stream(FIELD_POSITION, position, POSITION_LON)?,
        alt: decode_scalar_stream(FIELD_ALTITUDE, detail.altitude.as_deref())?,
        hrtimes: decode_heart_rate_times(heart_rate)?,
        hr: decode_sub_stream(FIELD_HEART_RATE, heart_rate, HEART_RATE_VALUE)?,
        steptimes: decode_sub_stream(FIELD_GAIT, gait, GAIT_TIME)?,
        stride: decode_sub_stream(FIELD_GAIT, gait, GAIT_STRIDE)?,
        cadence: decode_sub_stream(FIELD_GAIT, gait, GAIT_CADENCE)?,
    };

    debug!(
        trackid = %summary.trackid,
        times = data.times.len(),
        positions = data.lat.len(),
        altitudes = data.alt.len(),
        heart_rates = data.hr.len(),
        steps = data.steptimes.len(),
        "decoded workout streams"
    );

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackError;

    fn detail() -> WorkoutDetail {
        WorkoutDetail {
            time: Some("10;10;10".to_string()),
            longitude_latitude: Some(
                "100000000,200000000;100000000,200000000;100000000,200000000".to_string(),
            ),
            altitude: Some("100;100;100".to_string()),
            heart_rate: Some("10,120;10,125".to_string()),
            gait: Some("10,0,90,80;10,0,90,82".to_string()),
        }
    }

    fn summary() -> WorkoutSummary {
        WorkoutSummary {
            dis: Some("5.0".to_string()),
            ..WorkoutSummary::new("1000")
        }
    }

    #[test]
    fn test_decode_all_streams() {
        let data = decode_track_data(&summary(), &detail()).unwrap();
        assert_eq!(data.start_time, 1000);
        assert!((data.distance - 5.0).abs() < f64::EPSILON);
        assert_eq!(data.times, vec![10, 10, 10]);
        assert_eq!(data.lat, vec![100_000_000; 3]);
        assert_eq!(data.lon, vec![200_000_000; 3]);
        assert_eq!(data.alt, vec![100; 3]);
        assert_eq!(data.hrtimes, vec![10, 10]);
        assert_eq!(data.hr, vec![120, 125]);
        assert_eq!(data.steptimes, vec![10, 10]);
        assert_eq!(data.stride, vec![90, 90]);
        assert_eq!(data.cadence, vec![80, 82]);
    }

    #[test]
    fn test_absent_fields_decode_empty() {
        let data = decode_track_data(&summary(), &WorkoutDetail::default()).unwrap();
        assert!(data.times.is_empty());
        assert!(data.lat.is_empty());
        assert!(data.hr.is_empty());
        assert!(data.cadence.is_empty());
        assert!(!data.has_position_data());
    }

    #[test]
    fn test_position_decodes_lat_then_lon() {
        let lat = decode_sub_stream(FIELD_POSITION, Some("800000000,400000000;"), 0).unwrap();
        let lon = decode_sub_stream(FIELD_POSITION, Some("800000000,400000000;"), 1).unwrap();
        assert_eq!(lat, vec![800_000_000]);
        assert_eq!(lon, vec![400_000_000]);
    }

    // Documented quirk: an explicit zero delta reads as 1 just like an empty
    // one, so two heart-rate samples never share a timestamp.
    #[test]
    fn test_heart_rate_zero_delta_reads_as_one() {
        let times = decode_heart_rate_times(Some("0,120;,121;5,122")).unwrap();
        assert_eq!(times, vec![1, 1, 5]);

        let times = decode_heart_rate_times(Some("10,100;0,20")).unwrap();
        assert_eq!(times, vec![10, 1]);
    }

    #[test]
    fn test_malformed_token_is_fatal() {
        let mut bad = detail();
        bad.altitude = Some("100;1x0;100".to_string());
        match decode_track_data(&summary(), &bad) {
            Err(TrackError::InvalidNumber { field, token }) => {
                assert_eq!(field, FIELD_ALTITUDE);
                assert_eq!(token, "1x0");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_short_gait_group_is_fatal() {
        let mut bad = detail();
        bad.gait = Some("10,0,90".to_string());
        assert!(matches!(
            decode_track_data(&summary(), &bad),
            Err(TrackError::MissingValue {
                field: FIELD_GAIT,
                index: 3,
                ..
            })
        ));
    }
}
