use crate::parser::decoder::decode_track_data;
use crate::resample::{resample_track, ResampleOptions};
use crate::types::*;
use crate::Result;
use tracing::debug;

#[cfg(feature = "json")]
use crate::error::TrackError;
#[cfg(feature = "json")]
use anyhow::Context;
#[cfg(feature = "json")]
use serde_json::Value;
#[cfg(feature = "json")]
use std::path::Path;

/// File names of the per-workout dump layout `<dir>/<trackid>/...`
pub const HISTORY_FILE_NAME: &str = "history.json";
pub const DETAIL_FILE_NAME: &str = "detail.json";

/// Decode and resample one workout from its records
pub fn process_workout(
    summary: WorkoutSummary,
    detail: &WorkoutDetail,
    options: &ResampleOptions,
) -> Result<Workout> {
    let raw = decode_track_data(&summary, detail)?;
    let points = resample_track(&raw, options);

    debug!(
        trackid = %summary.trackid,
        points = points.len(),
        fix_gaps = options.fix_gaps,
        "processed workout"
    );

    Ok(Workout::new(summary, points))
}

/// Unwrap the object at `pointer` when the record comes in an API envelope
#[cfg(feature = "json")]
fn take_envelope(mut value: Value, pointer: &str) -> Value {
    let inner = value
        .pointer_mut(pointer)
        .filter(|inner| !inner.is_null())
        .map(Value::take);
    inner.unwrap_or(value)
}

/// Parse a detail record, accepting the bare object or the API envelope
/// `{"data": {...}}`
#[cfg(feature = "json")]
pub fn parse_detail_json(detail_json: &str) -> anyhow::Result<WorkoutDetail> {
    let value: Value = serde_json::from_str(detail_json).context("Failed to parse detail JSON")?;
    serde_json::from_value(take_envelope(value, "/data"))
        .context("Detail JSON has an unexpected shape")
}

/// Parse a summary record, accepting the bare object or the API envelope
#[cfg(feature = "json")]
pub fn parse_summary_json(summary_json: &str) -> anyhow::Result<WorkoutSummary> {
    let value: Value = serde_json::from_str(summary_json).context("Failed to parse summary JSON")?;
    serde_json::from_value(take_envelope(value, "/data"))
        .context("Summary JSON has an unexpected shape")
}

/// Decode and resample one workout from JSON text
#[cfg(feature = "json")]
pub fn parse_workout_json(
    summary_json: &str,
    detail_json: &str,
    options: &ResampleOptions,
) -> anyhow::Result<Workout> {
    let summary = parse_summary_json(summary_json)?;
    let detail = parse_detail_json(detail_json)?;
    let workout =
        process_workout(summary, &detail, options).context("Failed to decode workout streams")?;
    Ok(workout)
}

/// Load a workout directory holding `history.json` and `detail.json`
#[cfg(feature = "json")]
pub fn parse_workout_dir(dir: &Path, options: &ResampleOptions) -> anyhow::Result<Workout> {
    debug!(dir = %dir.display(), "loading workout directory");

    let history_path = dir.join(HISTORY_FILE_NAME);
    let detail_path = dir.join(DETAIL_FILE_NAME);

    let summary_json = std::fs::read_to_string(&history_path)
        .with_context(|| format!("Failed to read workout summary: {:?}", history_path))?;
    let detail_json = std::fs::read_to_string(&detail_path)
        .with_context(|| format!("Failed to read workout detail: {:?}", detail_path))?;

    let mut workout = parse_workout_json(&summary_json, &detail_json, options)
        .with_context(|| format!("Failed to process workout in {:?}", dir))?;
    workout.source_path = Some(dir.to_path_buf());
    Ok(workout)
}

/// Load all summaries from a history dump
///
/// Accepts the API envelope `{"data": {"summary": [...]}}` or a bare array.
#[cfg(feature = "json")]
pub fn parse_history_file(path: &Path) -> anyhow::Result<Vec<WorkoutSummary>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file: {:?}", path))?;
    parse_history_json(&text)
}

#[cfg(feature = "json")]
pub fn parse_history_json(history_json: &str) -> anyhow::Result<Vec<WorkoutSummary>> {
    let value: Value = serde_json::from_str(history_json).context("Failed to parse history JSON")?;
    let value = take_envelope(value, "/data/summary");
    if !value.is_array() {
        return Err(TrackError::InvalidRecord(
            "history JSON does not contain a summary list".to_string(),
        )
        .into());
    }
    serde_json::from_value(value).context("History summaries have an unexpected shape")
}
