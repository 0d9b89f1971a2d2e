//! Track point assembly
//!
//! Zips the master timeline with the resampled streams and converts raw
//! fixed-point values to physical units.

use crate::types::{Position, TrackPoint};

/// Raw streams resampled onto the master timeline, index-aligned with it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResampledStreams {
    pub timeline: Vec<i64>,
    pub lat: Vec<i64>,
    pub lon: Vec<i64>,
    pub alt: Vec<i64>,
    pub hr: Vec<i64>,
    pub stride: Vec<i64>,
    pub cadence: Vec<i64>,
}

impl ResampledStreams {
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }
}

/// Build track points in timeline order
///
/// Points stop at the shortest stream, which only differs from the timeline
/// length if the streams were not produced by the resampler.
pub fn assemble_track_points(start_time: i64, streams: &ResampledStreams) -> Vec<TrackPoint> {
    let n = [
        streams.timeline.len(),
        streams.lat.len(),
        streams.lon.len(),
        streams.alt.len(),
        streams.hr.len(),
        streams.stride.len(),
        streams.cadence.len(),
    ]
    .into_iter()
    .min()
    .unwrap_or(0);

    (0..n)
        .map(|i| TrackPoint {
            time: streams.timeline[i],
            timestamp: start_time.saturating_add(streams.timeline[i]),
            position: Position::from_raw(streams.lat[i], streams.lon[i], streams.alt[i]),
            heart_rate: streams.hr[i],
            stride: streams.stride[i],
            cadence: streams.cadence[i],
        })
        .collect()
}
