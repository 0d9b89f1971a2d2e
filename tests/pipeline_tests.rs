//! Integration tests for the decode -> resample -> assemble pipeline
//!
//! Covers:
//! - The reference three-sample workout
//! - Position unit round-trip
//! - Empty-track short-circuit
//! - Timeline completeness and ordering across irregular streams
//! - Gap compression through the public entry point
//! - Extreme 64-bit values in every stream and in the track id

use workout_export::{
    decode_track_data, process_workout, resample_track, write_gpx, ResampleOptions, TimeAxes,
    TrackError, WorkoutDetail, WorkoutSummary, NO_VALUE,
};

fn summary() -> WorkoutSummary {
    WorkoutSummary {
        dis: Some("5.0".to_string()),
        ..WorkoutSummary::new("1000")
    }
}

fn reference_detail() -> WorkoutDetail {
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

#[test]
fn test_reference_workout() {
    let workout = process_workout(summary(), &reference_detail(), &ResampleOptions::default())
        .expect("reference workout should decode");
    let points = &workout.points;

    assert_eq!(points.len(), 3);
    assert_eq!(
        points.iter().map(|p| p.time).collect::<Vec<_>>(),
        vec![10, 20, 30]
    );
    assert_eq!(
        points.iter().map(|p| p.timestamp).collect::<Vec<_>>(),
        vec![1010, 1020, 1030]
    );

    // Position groups are deltas, so every repeated group advances the track
    assert_eq!(
        points.iter().map(|p| p.position.lat).collect::<Vec<_>>(),
        vec![1.0, 2.0, 3.0]
    );
    assert_eq!(
        points.iter().map(|p| p.position.lon).collect::<Vec<_>>(),
        vec![2.0, 4.0, 6.0]
    );
    // Altitude is absolute
    assert!(points.iter().all(|p| p.position.alt == 1.0));

    // Heart rate is delta-encoded and clamps after its last sample
    assert_eq!(
        points.iter().map(|p| p.heart_rate).collect::<Vec<_>>(),
        vec![120, 245, 245]
    );
    assert_eq!(
        points.iter().map(|p| p.cadence).collect::<Vec<_>>(),
        vec![80, 82, 82]
    );
    assert!(points.iter().all(|p| p.stride == 90));
}

#[test]
fn test_stationary_position_stays_constant() {
    let detail = WorkoutDetail {
        longitude_latitude: Some("100000000,200000000;0,0;0,0".to_string()),
        ..reference_detail()
    };
    let workout = process_workout(summary(), &detail, &ResampleOptions::default()).unwrap();
    assert_eq!(workout.points.len(), 3);
    for point in &workout.points {
        assert_eq!(point.position.lat, 1.0);
        assert_eq!(point.position.lon, 2.0);
        assert_eq!(point.position.alt, 1.0);
    }
}

#[test]
fn test_position_unit_round_trip() {
    let detail = WorkoutDetail {
        time: Some("1".to_string()),
        longitude_latitude: Some("800000000,400000000".to_string()),
        altitude: Some("0".to_string()),
        ..WorkoutDetail::default()
    };
    let workout = process_workout(summary(), &detail, &ResampleOptions::default()).unwrap();
    assert_eq!(workout.points.len(), 1);
    assert_eq!(workout.points[0].position.lat, 8.0);
    assert_eq!(workout.points[0].position.lon, 4.0);
}

#[test]
fn test_empty_position_stream_yields_no_points() {
    let detail = WorkoutDetail {
        longitude_latitude: Some(String::new()),
        ..reference_detail()
    };
    let workout = process_workout(summary(), &detail, &ResampleOptions::default()).unwrap();
    assert!(workout.points.is_empty());
    assert!(!workout.has_track());
}

#[test]
fn test_heart_rate_without_position_time_axis() {
    // Heart rate reported between position samples lands on its own timestamps
    let detail = WorkoutDetail {
        time: Some("10;10".to_string()),
        longitude_latitude: Some("0,0;100,100".to_string()),
        altitude: Some("0;1000".to_string()),
        heart_rate: Some("5,100;10,10".to_string()),
        gait: None,
    };
    let workout = process_workout(summary(), &detail, &ResampleOptions::default()).unwrap();
    let times: Vec<i64> = workout.points.iter().map(|p| p.time).collect();
    assert_eq!(times, vec![5, 10, 15, 20]);

    // altitude 0 -> 1000 between t=10 and t=20, clamped before t=10
    let alts: Vec<f64> = workout.points.iter().map(|p| p.position.alt).collect();
    assert_eq!(alts, vec![0.0, 0.0, 5.0, 10.0]);

    // heart rate 100 at t=5, 110 at t=15
    let hrs: Vec<i64> = workout.points.iter().map(|p| p.heart_rate).collect();
    assert_eq!(hrs, vec![100, 105, 110, 110]);

    // no gait stream resamples to zero
    assert!(workout.points.iter().all(|p| p.cadence == 0 && p.stride == 0));
}

#[test]
fn test_missing_heart_rate_is_forward_filled() {
    let detail = WorkoutDetail {
        heart_rate: Some(format!("10,120;10,{NO_VALUE}")),
        ..reference_detail()
    };
    let workout = process_workout(summary(), &detail, &ResampleOptions::default()).unwrap();
    // the sentinel delta is replaced by the previous delta before summing
    assert_eq!(
        workout.points.iter().map(|p| p.heart_rate).collect::<Vec<_>>(),
        vec![120, 240, 240]
    );
}

#[test]
fn test_malformed_stream_is_an_error() {
    let detail = WorkoutDetail {
        gait: Some("10,0,90,eighty".to_string()),
        ..reference_detail()
    };
    let err = process_workout(summary(), &detail, &ResampleOptions::default()).unwrap_err();
    assert!(matches!(err, TrackError::InvalidNumber { field: "gait", .. }));
}

/// Small deterministic generator for irregular sampling patterns
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> i64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) % bound) as i64
    }

    fn encode(&mut self, samples: usize, group: impl Fn(&mut Self) -> String) -> String {
        (0..samples).map(|_| group(self)).collect::<Vec<_>>().join(";")
    }
}

#[test]
fn test_timeline_complete_and_ordered_for_irregular_streams() {
    let mut rng = Lcg(0x5eed);
    for _ in 0..50 {
        let positions = 1 + rng.next(20) as usize;
        let heart_rates = rng.next(20) as usize;
        let steps = rng.next(20) as usize;

        let detail = WorkoutDetail {
            time: Some(rng.encode(positions, |r| r.next(30).to_string())),
            longitude_latitude: Some(rng.encode(positions, |r| {
                format!("{},{}", r.next(2000) - 1000, r.next(2000) - 1000)
            })),
            altitude: Some(rng.encode(positions, |r| r.next(5000).to_string())),
            heart_rate: Some(rng.encode(heart_rates, |r| {
                format!("{},{}", r.next(10), r.next(10))
            })),
            gait: Some(rng.encode(steps, |r| {
                format!("{},0,{},{}", 1 + r.next(15), r.next(120), r.next(200))
            })),
        };

        let raw = decode_track_data(&summary(), &detail).unwrap();
        let axes = TimeAxes::from_raw(&raw);
        let timeline = axes.master_timeline();
        let points = resample_track(&raw, &ResampleOptions::default());

        assert_eq!(points.len(), timeline.len());
        assert!(points.windows(2).all(|w| w[0].time < w[1].time));
        for axis in [&axes.track, &axes.heart_rate, &axes.step] {
            assert!(axis.iter().all(|t| timeline.binary_search(t).is_ok()));
        }
        assert!(points.iter().all(|p| p.timestamp == 1000 + p.time));
    }
}

#[test]
fn test_fix_gaps_uses_summary_cost_time() {
    let summary = WorkoutSummary {
        end_time: Some("2000".to_string()),
        cost_time: Some("30".to_string()),
        ..WorkoutSummary::new("1000")
    };
    let detail = WorkoutDetail {
        time: Some("10;10;900".to_string()),
        longitude_latitude: Some("1,1;1,1;1,1".to_string()),
        altitude: Some("0;0;0".to_string()),
        ..WorkoutDetail::default()
    };

    let plain = process_workout(summary.clone(), &detail, &ResampleOptions::default()).unwrap();
    assert_eq!(plain.duration_seconds(), 910);

    let options = ResampleOptions {
        fix_gaps: true,
        ..ResampleOptions::default()
    };
    let fixed = process_workout(summary, &detail, &options).unwrap();
    assert_eq!(
        fixed.points.iter().map(|p| p.time).collect::<Vec<_>>(),
        vec![10, 20, 30]
    );
}

#[test]
fn test_extreme_values_resample_and_export() {
    let summary = WorkoutSummary::new(i64::MAX.to_string());
    let detail = WorkoutDetail {
        time: Some("10;10".to_string()),
        longitude_latitude: Some(format!("{},{};{},{}", i64::MAX, i64::MIN + 1, i64::MAX, 1)),
        altitude: Some(format!("{};{}", i64::MIN + 1, i64::MAX)),
        heart_rate: Some(format!("10,{};10,{}", i64::MAX, i64::MAX)),
        gait: Some(format!("10,0,{},{}", i64::MIN + 1, i64::MAX)),
    };

    let workout = process_workout(summary, &detail, &ResampleOptions::default())
        .expect("extreme values should decode");
    let points = &workout.points;
    assert_eq!(points.len(), 2);
    assert_eq!(points.iter().map(|p| p.time).collect::<Vec<_>>(), vec![10, 20]);
    assert!(points.iter().all(|p| p.timestamp == i64::MAX));

    assert_eq!(points[0].position.alt, (i64::MIN + 1) as f64 / 100.0);
    assert_eq!(points[1].position.alt, i64::MAX as f64 / 100.0);
    // running sums saturate instead of wrapping
    assert_eq!(points[1].heart_rate, i64::MAX);
    assert_eq!(points[0].stride, i64::MIN + 1);
    assert_eq!(points[1].cadence, i64::MAX);

    let mut buffer = Vec::new();
    write_gpx(&mut buffer, &workout).expect("GPX should be written");
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.contains("<name>9999-12-31T23:59:59</name>"));
}
