//! CLI binary for Workout Export
//!
//! Converts dumped workouts (`<dir>/<trackid>/history.json` + `detail.json`)
//! into GPX, CSV or GeoJSON tracks.

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use glob::glob;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use workout_export::{
    export_workout, parse_history_file, parse_workout_dir, ExportOptions, ResampleOptions,
    DETAIL_FILE_NAME, HISTORY_FILE_NAME,
};

fn build_command() -> Command {
    Command::new("Workout Export")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resample dumped fitness-tracker workouts and export them as GPS tracks.")
        .arg(
            Arg::new("inputs")
                .help("Workout directories, or directories containing them (supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed resampling information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("gpx")
                .long("gpx")
                .help("Export tracks to GPX files (default when no format is chosen)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export track points to CSV files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("geojson")
                .long("geojson")
                .help("Export track points to GeoJSON files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: the workout directory)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("history")
                .long("history")
                .help("Only export workouts listed in this history dump")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("fix-gaps")
                .long("fix-gaps")
                .help("Shrink recording pauses so the track fits the workout's active time")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .help("Export even when heuristics would skip the workout")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn is_workout_dir(path: &Path) -> bool {
    path.join(HISTORY_FILE_NAME).is_file() && path.join(DETAIL_FILE_NAME).is_file()
}

/// Resolve one input to workout directories: itself, or its workout subdirectories
fn collect_workout_dirs(path: &Path) -> Result<Vec<PathBuf>> {
    if is_workout_dir(path) {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let candidate = entry?.path();
        if candidate.is_dir() && is_workout_dir(&candidate) {
            dirs.push(candidate);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn expand_pattern(pattern: &str) -> Vec<PathBuf> {
    if !(pattern.contains('*') || pattern.contains('?')) {
        return vec![PathBuf::from(pattern)];
    }

    match glob(pattern) {
        Ok(paths) => match paths.collect::<Result<Vec<_>, _>>() {
            Ok(paths) => {
                debug!(pattern, matched = paths.len(), "expanded glob pattern");
                paths
            }
            Err(e) => {
                error!("Error expanding glob pattern '{pattern}': {e}");
                Vec::new()
            }
        },
        Err(e) => {
            error!("Invalid glob pattern '{pattern}': {e}");
            Vec::new()
        }
    }
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    init_logging(debug);
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        git_sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        "starting"
    );

    let export_csv = matches.get_flag("csv");
    let export_geojson = matches.get_flag("geojson");
    let export_gpx = matches.get_flag("gpx") || !(export_csv || export_geojson);

    let export_options = ExportOptions {
        gpx: export_gpx,
        csv: export_csv,
        geojson: export_geojson,
        output_dir: matches.get_one::<String>("output-dir").cloned(),
        force_export: matches.get_flag("force"),
    };
    let resample_options = ResampleOptions {
        fix_gaps: matches.get_flag("fix-gaps"),
        ..ResampleOptions::default()
    };

    let listed: Option<HashSet<String>> = match matches.get_one::<String>("history") {
        Some(path) => {
            let summaries = parse_history_file(Path::new(path))?;
            info!("History {path} lists {} workouts", summaries.len());
            Some(summaries.into_iter().map(|s| s.trackid).collect())
        }
        None => None,
    };

    let patterns: Vec<&String> = matches
        .get_many::<String>("inputs")
        .map(|values| values.collect())
        .unwrap_or_default();
    debug!(?patterns, "input patterns");

    let mut workout_dirs = Vec::new();
    for path in patterns.iter().flat_map(|p| expand_pattern(p)) {
        if !path.is_dir() {
            warn!("Skipping input that is not a directory: {path:?}");
            continue;
        }
        match collect_workout_dirs(&path) {
            Ok(dirs) if dirs.is_empty() => warn!("No workouts found in {path:?}"),
            Ok(dirs) => workout_dirs.extend(dirs),
            Err(e) => error!("Failed to scan {path:?}: {e}"),
        }
    }

    if workout_dirs.is_empty() {
        error!("No workout directories found to process.");
        error!("Each workout directory needs {HISTORY_FILE_NAME} and {DETAIL_FILE_NAME}.");
        std::process::exit(1);
    }

    info!("Found {} workouts", workout_dirs.len());

    let mut processed = 0;
    let mut skipped = 0;
    for dir in &workout_dirs {
        let workout = match parse_workout_dir(dir, &resample_options) {
            Ok(workout) => workout,
            Err(e) => {
                error!("Error processing {dir:?}: {e:#}");
                continue;
            }
        };

        if let Some(listed) = &listed {
            if !listed.contains(&workout.summary.trackid) {
                debug!(trackid = %workout.summary.trackid, "not in history, skipping");
                continue;
            }
        }

        match export_workout(&workout, dir, &export_options) {
            Ok(report) => {
                if let Some(reason) = &report.skipped {
                    info!("Skipped workout {}: {reason}", workout.summary.trackid);
                    skipped += 1;
                } else {
                    info!(
                        "Workout {} ({}, {} points) -> {} file(s)",
                        workout.summary.trackid,
                        workout.workout_type(),
                        workout.points.len(),
                        report.written()
                    );
                }
                processed += 1;
            }
            Err(e) => error!("Error exporting {dir:?}: {e:#}"),
        }
    }

    info!("Processed {processed} workouts ({skipped} skipped without track)");

    if processed == 0 {
        error!(
            "No workouts were successfully processed out of {} found.",
            workout_dirs.len()
        );
        std::process::exit(1);
    }

    Ok(())
}
