//! Time axes and the unified master timeline
//!
//! Each sensor stream carries its own delta-encoded time axis. They are
//! turned into workout-relative absolute times here and merged into the
//! master timeline every stream is resampled onto.

use crate::parser::helpers::cumulative_sum;
use crate::types::RawTrackData;
use tracing::debug;

/// Absolute (workout-relative) time axes of the three sensor streams
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeAxes {
    /// Position and altitude samples
    pub track: Vec<i64>,
    pub heart_rate: Vec<i64>,
    /// Stride and cadence samples
    pub step: Vec<i64>,
}

impl TimeAxes {
    /// Running sums of the raw per-stream time deltas
    pub fn from_deltas(times: &[i64], hrtimes: &[i64], steptimes: &[i64]) -> Self {
        Self {
            track: cumulative_sum(times),
            heart_rate: cumulative_sum(hrtimes),
            step: cumulative_sum(steptimes),
        }
    }

    pub fn from_raw(raw: &RawTrackData) -> Self {
        Self::from_deltas(&raw.times, &raw.hrtimes, &raw.steptimes)
    }

    /// Sorted, duplicate-free union of all three axes
    pub fn master_timeline(&self) -> Vec<i64> {
        let mut timeline: Vec<i64> = self
            .track
            .iter()
            .chain(&self.heart_rate)
            .chain(&self.step)
            .copied()
            .collect();
        timeline.sort_unstable();
        timeline.dedup();
        timeline
    }

    /// Shorten oversized gaps until the timeline fits the `cost_time` budget
    ///
    /// Repeatedly takes the widest gap of the master timeline (measured from
    /// 0 for the first sample) and shifts every time at or after its end
    /// backwards, never below a gap of 1. Stops once the excess is used up or
    /// the widest gap cannot shrink any further. Returns the total shift.
    pub fn compress_gaps(&mut self, cost_time: i64) -> i64 {
        let mut timeline = self.master_timeline();
        let mut excess = match (self.track.is_empty(), timeline.last()) {
            (false, Some(&last)) => last.saturating_sub(cost_time),
            _ => 0,
        };
        let mut total: i64 = 0;

        while excess > 0 {
            let Some((gap_end, widest)) = widest_gap(&timeline) else {
                break;
            };

            let change = (widest - excess).max(1) - widest;
            if change == 0 {
                break;
            }

            for axis in [&mut self.track, &mut self.heart_rate, &mut self.step] {
                shift_from(axis, gap_end, change);
            }
            debug!(gap_end, widest, change, "compressed timeline gap");

            excess += change;
            total = total.saturating_sub(change);
            timeline = self.master_timeline();
        }

        total
    }
}

/// End time and width of the first widest gap, counting the lead-in from 0
fn widest_gap(timeline: &[i64]) -> Option<(i64, i64)> {
    let mut previous = 0;
    let mut widest: Option<(i64, i64)> = None;
    for &time in timeline {
        let gap = time.saturating_sub(previous);
        previous = time;
        if gap > widest.map_or(0, |(_, w)| w) {
            widest = Some((time, gap));
        }
    }
    widest
}

fn shift_from(axis: &mut [i64], from: i64, change: i64) {
    for time in axis.iter_mut().filter(|t| **t >= from) {
        *time = time.saturating_add(change);
    }
}
