//! Track resampling engine
//!
//! Position, heart-rate and gait streams are sampled independently. This
//! module projects all of them onto one master timeline:
//!
//! 1. turn the per-stream time deltas into absolute axes ([`TimeAxes`]),
//!    optionally compressing recording pauses
//! 2. merge the axes into the sorted, duplicate-free master timeline
//! 3. forward-fill missing readings, then sum delta-encoded streams
//! 4. interpolate every stream at every master timestamp
//! 5. zip the results into [`TrackPoint`]s

pub mod assemble;
pub mod gap_fill;
pub mod interpolate;
pub mod timeline;

pub use assemble::*;
pub use gap_fill::*;
pub use interpolate::*;
pub use timeline::*;

use crate::parser::helpers::cumulative_sum;
use crate::types::{RawTrackData, TrackPoint};
use tracing::debug;

/// Sentinel the service uses for "sensor did not report a value"
pub const NO_VALUE: i64 = -2_000_000;

/// Options controlling one resampling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResampleOptions {
    /// Value marking a missing reading
    pub no_value: i64,
    /// Shrink oversized pauses so the timeline fits the workout's cost time
    pub fix_gaps: bool,
}

impl Default for ResampleOptions {
    fn default() -> Self {
        Self {
            no_value: NO_VALUE,
            fix_gaps: false,
        }
    }
}

/// How a raw stream stores its values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEncoding {
    /// Each value is the change since the previous sample
    Delta,
    /// Each value is the reading itself
    Absolute,
}

/// Project one raw stream onto the master timeline
///
/// Missing readings are forward-filled before delta streams are summed, so a
/// sentinel never enters a running total.
pub fn resample_stream(
    axis: &[i64],
    values: &[i64],
    encoding: StreamEncoding,
    timeline: &[i64],
    options: &ResampleOptions,
) -> Vec<i64> {
    if timeline.is_empty() {
        return Vec::new();
    }

    let filled = fill_gaps(values, options.no_value);
    let absolute = match encoding {
        StreamEncoding::Delta => cumulative_sum(&filled),
        StreamEncoding::Absolute => filled,
    };

    PiecewiseInterpolator::new(axis, &absolute).resample(timeline)
}

/// Resample every stream of a workout onto its master timeline
///
/// Returns empty streams when the workout has no position samples.
pub fn resample_streams(raw: &RawTrackData, options: &ResampleOptions) -> ResampledStreams {
    if !raw.has_position_data() {
        return ResampledStreams::default();
    }

    let mut axes = TimeAxes::from_raw(raw);
    if options.fix_gaps {
        let shifted = axes.compress_gaps(raw.cost_time);
        debug!(shifted, cost_time = raw.cost_time, "gap compression finished");
    }
    let timeline = axes.master_timeline();

    use StreamEncoding::{Absolute, Delta};
    let streams = ResampledStreams {
        lat: resample_stream(&axes.track, &raw.lat, Delta, &timeline, options),
        lon: resample_stream(&axes.track, &raw.lon, Delta, &timeline, options),
        alt: resample_stream(&axes.track, &raw.alt, Absolute, &timeline, options),
        hr: resample_stream(&axes.heart_rate, &raw.hr, Delta, &timeline, options),
        stride: resample_stream(&axes.step, &raw.stride, Absolute, &timeline, options),
        cadence: resample_stream(&axes.step, &raw.cadence, Absolute, &timeline, options),
        timeline,
    };

    debug!(
        start_time = raw.start_time,
        points = streams.len(),
        "resampled streams onto master timeline"
    );

    streams
}

/// Decode-to-points entry point for one workout
///
/// An empty result means the workout has no usable track; callers should skip
/// exporting it.
pub fn resample_track(raw: &RawTrackData, options: &ResampleOptions) -> Vec<TrackPoint> {
    let streams = resample_streams(raw, options);
    assemble_track_points(raw.start_time, &streams)
}
