use crate::conversion::WorkoutType;
use crate::types::{TrackPoint, WorkoutSummary};
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One loaded and resampled workout
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Workout {
    pub summary: WorkoutSummary,
    pub points: Vec<TrackPoint>,
    /// Directory or file the workout was loaded from, if any
    pub source_path: Option<PathBuf>,
}

impl Workout {
    pub fn new(summary: WorkoutSummary, points: Vec<TrackPoint>) -> Self {
        Self {
            summary,
            points,
            source_path: None,
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        WorkoutType::from_code(self.summary.workout_type)
    }

    pub fn has_track(&self) -> bool {
        !self.points.is_empty()
    }

    /// Elapsed seconds between the first and last resampled point
    pub fn duration_seconds(&self) -> i64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.time.saturating_sub(first.time),
            _ => 0,
        }
    }

    /// Check if any resampled point carries a heart rate reading
    pub fn has_heart_rate(&self) -> bool {
        self.points.iter().any(|p| p.heart_rate != 0)
    }
}
