//! Export functionality for resampled workouts
//!
//! Writes track points to GPX, CSV and GeoJSON. Output files are named after
//! the workout's track id and land next to the input, or in
//! [`ExportOptions::output_dir`] when set.

use crate::conversion::{format_date, format_timestamp, WorkoutType};
use crate::error::TrackError;
use crate::filters::should_skip_workout;
use crate::types::*;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub gpx: bool,
    pub csv: bool,
    pub geojson: bool,
    pub output_dir: Option<String>,
    pub force_export: bool,
}

/// Paths written by one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub gpx_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    pub geojson_path: Option<PathBuf>,
    /// Reason the workout was not exported, if it was skipped
    pub skipped: Option<String>,
}

impl ExportReport {
    pub fn written(&self) -> usize {
        [&self.gpx_path, &self.csv_path, &self.geojson_path]
            .iter()
            .filter(|path| path.is_some())
            .count()
    }
}

/// Output locations for one workout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub output_dir: PathBuf,
    pub gpx: PathBuf,
    pub csv: PathBuf,
    pub geojson: PathBuf,
}

/// Compute output paths for a workout
///
/// Without an explicit output directory, files go into the input directory
/// itself (or the parent of an input file), mirroring the
/// `<dir>/<trackid>/<trackid>.gpx` dump layout.
pub fn compute_export_paths(
    input_path: &Path,
    trackid: &str,
    options: &ExportOptions,
) -> ExportPaths {
    let output_dir = match options.output_dir.as_deref() {
        Some(dir) => PathBuf::from(dir),
        None if input_path.is_dir() => input_path.to_path_buf(),
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    ExportPaths {
        gpx: output_dir.join(format!("{trackid}.gpx")),
        csv: output_dir.join(format!("{trackid}.csv")),
        geojson: output_dir.join(format!("{trackid}.geojson")),
        output_dir,
    }
}

/// Export a workout to every format enabled in `options`
pub fn export_workout(
    workout: &Workout,
    input_path: &Path,
    options: &ExportOptions,
) -> Result<ExportReport> {
    let mut report = ExportReport::default();

    let (skip, reason) = should_skip_workout(workout, options.force_export);
    if skip {
        info!(trackid = %workout.summary.trackid, %reason, "skipping export");
        report.skipped = Some(reason);
        return Ok(report);
    }

    let paths = compute_export_paths(input_path, &workout.summary.trackid, options);
    if !paths.output_dir.exists() {
        std::fs::create_dir_all(&paths.output_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", paths.output_dir))?;
    }

    if options.gpx {
        export_to_gpx(workout, &paths.gpx)?;
        report.gpx_path = Some(paths.gpx);
    }

    if options.csv {
        report.csv_path = export_csv_if_available(workout, paths.csv)?;
    }

    if options.geojson {
        report.geojson_path = export_geojson_if_available(workout, paths.geojson)?;
    }

    Ok(report)
}

#[cfg(feature = "csv")]
fn export_csv_if_available(workout: &Workout, path: PathBuf) -> Result<Option<PathBuf>> {
    export_to_csv(workout, &path)?;
    Ok(Some(path))
}

#[cfg(not(feature = "csv"))]
fn export_csv_if_available(_workout: &Workout, _path: PathBuf) -> Result<Option<PathBuf>> {
    warn!("CSV export requested but the `csv` feature is disabled");
    Ok(None)
}

#[cfg(feature = "json")]
fn export_geojson_if_available(workout: &Workout, path: PathBuf) -> Result<Option<PathBuf>> {
    export_to_geojson(workout, &path)?;
    Ok(Some(path))
}

#[cfg(not(feature = "json"))]
fn export_geojson_if_available(_workout: &Workout, _path: PathBuf) -> Result<Option<PathBuf>> {
    warn!("GeoJSON export requested but the `json` feature is disabled");
    Ok(None)
}

/// Export a workout's track to a GPX file
pub fn export_to_gpx(workout: &Workout, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create GPX file: {output_path:?}"))?;
    let mut writer = BufWriter::new(file);

    write_gpx(&mut writer, workout)?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush GPX file: {output_path:?}"))?;

    info!(path = %output_path.display(), points = workout.points.len(), "exported GPX");
    Ok(())
}

/// Write GPX 1.1 with heart-rate and cadence extensions
///
/// A workout without track points is rejected rather than written as an
/// empty track segment.
pub fn write_gpx<W: Write>(writer: &mut W, workout: &Workout) -> Result<()> {
    if workout.points.is_empty() {
        return Err(TrackError::Export(format!(
            "workout {} has no track points",
            workout.summary.trackid
        ))
        .into());
    }

    let start = format_timestamp(workout.summary.start_time()?);
    let ind = "\t";

    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>"#)?;
    writeln!(
        writer,
        r#"<gpx xmlns="http://www.topografix.com/GPX/1/1" xmlns:gpxdata="http://www.cluetrust.com/XML/GPXDATA/1/0" xmlns:gpxtpx="http://www.garmin.com/xmlschemas/TrackPointExtension/v1">"#
    )?;
    writeln!(writer, "{ind}<metadata><time>{start}</time></metadata>")?;
    writeln!(writer, "{ind}<trk>")?;
    writeln!(writer, "{ind}{ind}<name>{start}</name>")?;

    match workout.workout_type() {
        WorkoutType::Unknown(code) => warn!(
            trackid = %workout.summary.trackid,
            code, "unhandled workout type"
        ),
        known => {
            if let Some(label) = known.label() {
                writeln!(writer, "{ind}{ind}<type>{label}</type>")?;
            }
        }
    }

    writeln!(writer, "{ind}{ind}<trkseg>")?;
    for point in &workout.points {
        let mut extensions = String::new();
        if point.heart_rate != 0 {
            extensions.push_str(&format!(
                "<gpxtpx:TrackPointExtension><gpxtpx:hr>{hr}</gpxtpx:hr></gpxtpx:TrackPointExtension><gpxdata:hr>{hr}</gpxdata:hr>",
                hr = point.heart_rate
            ));
        }
        if point.cadence != 0 {
            extensions.push_str(&format!(
                "<gpxdata:cadence>{}</gpxdata:cadence>",
                point.cadence
            ));
        }
        writeln!(
            writer,
            r#"{ind}{ind}{ind}<trkpt lat="{:?}" lon="{:?}"><ele>{:?}</ele><time>{}</time><extensions>{}</extensions></trkpt>"#,
            point.position.lat,
            point.position.lon,
            point.position.alt,
            format_timestamp(point.timestamp),
            extensions
        )?;
    }
    writeln!(writer, "{ind}{ind}</trkseg>")?;
    writeln!(writer, "{ind}</trk>")?;
    write!(writer, "</gpx>")?;

    Ok(())
}

/// Column order of the CSV export
pub const CSV_COLUMNS: [&str; 7] = [
    "track_date",
    "timestamp",
    "latitude",
    "longitude",
    "altitude",
    "heart_rate",
    "cadence",
];

/// Export a workout's track to CSV, one row per point
#[cfg(feature = "csv")]
pub fn export_to_csv(workout: &Workout, output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create CSV file: {output_path:?}"))?;

    let track_date = format_date(workout.summary.start_time()?);
    writer.write_record(CSV_COLUMNS)?;
    for point in &workout.points {
        writer.write_record([
            track_date.clone(),
            format_timestamp(point.timestamp),
            point.position.lat.to_string(),
            point.position.lon.to_string(),
            point.position.alt.to_string(),
            point.heart_rate.to_string(),
            point.cadence.to_string(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {output_path:?}"))?;

    info!(path = %output_path.display(), points = workout.points.len(), "exported CSV");
    Ok(())
}

/// Build a GeoJSON FeatureCollection of the track points (EPSG:4326)
#[cfg(feature = "json")]
pub fn track_to_geojson(workout: &Workout) -> Result<serde_json::Value> {
    use serde_json::json;

    let track_date = format_date(workout.summary.start_time()?);
    let features: Vec<serde_json::Value> = workout
        .points
        .iter()
        .map(|point| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [point.position.lon, point.position.lat, point.position.alt],
                },
                "properties": {
                    "track_date": track_date,
                    "timestamp": format_timestamp(point.timestamp),
                    "latitude": point.position.lat,
                    "longitude": point.position.lon,
                    "altitude": point.position.alt,
                    "heart_rate": point.heart_rate,
                    "cadence": point.cadence,
                },
            })
        })
        .collect();

    Ok(json!({
        "type": "FeatureCollection",
        "name": workout.summary.trackid,
        "crs": {
            "type": "name",
            "properties": { "name": "urn:ogc:def:crs:EPSG::4326" },
        },
        "features": features,
    }))
}

/// Export a workout's track to a GeoJSON file
#[cfg(feature = "json")]
pub fn export_to_geojson(workout: &Workout, output_path: &Path) -> Result<()> {
    let collection = track_to_geojson(workout)?;
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create GeoJSON file: {output_path:?}"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &collection)
        .with_context(|| format!("Failed to write GeoJSON file: {output_path:?}"))?;
    writer.flush()?;

    info!(path = %output_path.display(), points = workout.points.len(), "exported GeoJSON");
    Ok(())
}
