//! Workout Export Library
//!
//! A Rust library for turning fitness-tracker workout records into GPS tracks.
//! The service delivers position, heart-rate and gait streams as compact,
//! independently sampled, partly delta-encoded text fields. This library
//! decodes them, resamples every stream onto one master timeline and exports
//! the result.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export functionality
//! - **`json`** (default): Load JSON records and export GeoJSON
//! - **`cli`** (default): Build the command-line interface binary
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Decode and resample a workout from its records:
//! ```rust
//! use workout_export::{process_workout, ResampleOptions, WorkoutDetail, WorkoutSummary};
//!
//! let summary = WorkoutSummary::new("1000");
//! let detail = WorkoutDetail {
//!     time: Some("10;10".to_string()),
//!     longitude_latitude: Some("100000000,200000000;0,0".to_string()),
//!     altitude: Some("100;100".to_string()),
//!     ..WorkoutDetail::default()
//! };
//! let workout = process_workout(summary, &detail, &ResampleOptions::default()).unwrap();
//! assert_eq!(workout.points.len(), 2);
//! assert_eq!(workout.points[0].position.lat, 1.0);
//! ```
//!
//! Export a dumped workout directory to GPX:
//! ```rust,no_run
//! use workout_export::{export_workout, parse_workout_dir, ExportOptions, ResampleOptions};
//! use std::path::Path;
//!
//! let dir = Path::new("workouts/1571234567");
//! let workout = parse_workout_dir(dir, &ResampleOptions::default()).unwrap();
//! let options = ExportOptions {
//!     gpx: true,
//!     ..ExportOptions::default()
//! };
//! let report = export_workout(&workout, dir, &options).unwrap();
//! if let Some(path) = report.gpx_path {
//!     println!("Exported to: {}", path.display());
//! }
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_workout_dir`] - Load `history.json` + `detail.json` from a directory
//! - [`parse_workout_json`] - Decode and resample from JSON text
//! - [`parse_history_file`] - Read all summaries from a history dump
//! - [`process_workout`] - Decode and resample already-parsed records
//! - [`decode_track_data`] - Low-level stream decoding
//!
//! ## Resampling
//! - [`resample_track`] - Raw streams to time-ordered [`TrackPoint`]s
//! - [`PiecewiseInterpolator`] - Integer piecewise-linear interpolation
//! - [`TimeAxes`] - Per-stream time axes, master timeline and gap compression
//! - [`fill_gaps`] - Forward-fill of missing readings
//!
//! ## Export Functions
//! - [`export_workout`] - Export to every enabled format
//! - [`export_to_gpx`], [`write_gpx`] - GPX 1.1 with heart-rate/cadence extensions
//! - `export_to_csv` - CSV rows (feature `csv`)
//! - `export_to_geojson` - GeoJSON FeatureCollection (feature `json`)
//! - [`compute_export_paths`] - Helper for consistent path computation

// Module declarations
pub mod conversion;
pub mod error;
pub mod export;
pub mod filters;
pub mod parser;
pub mod resample;
pub mod types;

// Re-export everything from modules for convenience
pub use conversion::*;
pub use error::*;
pub use export::*;
pub use filters::*;
pub use parser::*;
pub use resample::*;
pub use types::*;
