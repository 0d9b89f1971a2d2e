//! Export filtering heuristics
//!
//! Decides whether a resampled workout is worth writing out. A workout whose
//! position stream decoded to nothing yields no points and is skipped; this is
//! an informational outcome, not an error.

use crate::types::{TrackPoint, Workout};

/// Determines if a workout should be skipped for export
///
/// # Arguments
/// * `points` - Resampled track points of the workout
/// * `force_export` - Overrides heuristics; an empty track is still skipped
///   because there is nothing to write
///
/// # Returns
/// Tuple of (should_skip, reason_description)
pub fn should_skip_export(points: &[TrackPoint], _force_export: bool) -> (bool, String) {
    if points.is_empty() {
        return (true, "no position data".to_string());
    }

    (false, String::new())
}

/// Convenience wrapper for a loaded workout
pub fn should_skip_workout(workout: &Workout, force_export: bool) -> (bool, String) {
    should_skip_export(&workout.points, force_export)
}
