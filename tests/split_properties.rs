// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Property checks for split calculation over generated tracks.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use ran::models::{Segment, Track, TrackPoint};
use ran::services::calculate_splits;
use ran::services::splits::{distance_2d, point_pairs, SplitError, SPLIT_DISTANCE_METERS};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 5, 6, 30, 0).unwrap()
}

/// One step of a walk: (dlon, dlat, seconds). Up to ~150 m per step,
/// stationary steps and zero-second steps included.
fn arb_step() -> impl Strategy<Value = (f64, f64, i64)> {
    (-0.001f64..0.001, -0.001f64..0.001, 0i64..60)
}

/// A track of 1-4 segments, each 1-80 points. Time never goes backwards,
/// including across segment gaps.
fn arb_track() -> impl Strategy<Value = Track> {
    prop::collection::vec(
        (prop::collection::vec(arb_step(), 1..80), 0i64..600),
        1..4,
    )
    .prop_map(|segments| {
        let (mut lon, mut lat) = (-122.1, 37.4);
        let mut time = start();

        let segments = segments
            .into_iter()
            .map(|(steps, gap)| {
                time += Duration::seconds(gap);
                let points = steps
                    .into_iter()
                    .map(|(dlon, dlat, dt)| {
                        lon += dlon;
                        lat += dlat;
                        time += Duration::seconds(dt);
                        TrackPoint::new(lon, lat, Some(30.0 + dlat * 1e4), time)
                    })
                    .collect();
                Segment { points }
            })
            .collect();

        Track {
            name: None,
            segments,
        }
    })
}

fn total_distance(tracks: &[Track]) -> f64 {
    point_pairs(tracks).map(|(a, b)| distance_2d(a, b)).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn splits_cover_total_distance(track in arb_track()) {
        let tracks = vec![track];
        let expected = total_distance(&tracks);
        let splits = calculate_splits(&tracks).unwrap();

        let covered: f64 = splits.iter().map(|s| s.distance).sum();
        prop_assert!((covered - expected).abs() < 1e-6, "covered {} expected {}", covered, expected);

        let full = splits
            .iter()
            .filter(|s| s.distance == SPLIT_DISTANCE_METERS)
            .count();
        prop_assert_eq!(full, (expected / SPLIT_DISTANCE_METERS).floor() as usize);

        prop_assert!(splits
            .iter()
            .all(|s| s.distance > 0.0 && s.distance <= SPLIT_DISTANCE_METERS));
        if expected == 0.0 {
            prop_assert!(splits.is_empty());
        }
    }

    #[test]
    fn split_times_are_non_negative_and_bounded(track in arb_track()) {
        let tracks = vec![track];
        let Some(first) = point_pairs(&tracks).next().map(|(a, _)| a.time) else {
            prop_assert!(calculate_splits(&tracks).unwrap().is_empty());
            return Ok(());
        };
        let last = tracks[0]
            .segments
            .iter()
            .rev()
            .find_map(|s| s.points.last())
            .unwrap()
            .time;
        let elapsed = (last - first).num_seconds() as f64;

        let splits = calculate_splits(&tracks).unwrap();
        prop_assert!(splits.iter().all(|s| s.split_time >= 0.0));

        // Intervals chain end to end, so cumulative time never exceeds the
        // recording and reaches its end whenever a partial split closes it.
        let timed: f64 = splits.iter().map(|s| s.split_time).sum();
        prop_assert!(timed <= elapsed + 1e-9);
        if splits.last().is_some_and(|s| s.distance < SPLIT_DISTANCE_METERS) {
            prop_assert!((timed - elapsed).abs() < 1e-9);
        }
    }

    #[test]
    fn segment_starting_before_open_interval_is_rejected(
        first in prop::collection::vec(arb_step(), 2..40),
        second in prop::collection::vec(arb_step(), 2..40),
    ) {
        let mut track = track_from(vec![first, second]);
        // Move the first segment past everything the second one covers.
        for p in track.segments[0].points.iter_mut() {
            p.time += Duration::seconds(10_000);
        }

        prop_assert!(matches!(
            calculate_splits(&[track]),
            Err(SplitError::MalformedTrack { .. })
        ), "expected SplitError::MalformedTrack");
    }
}

/// Build a track from fixed step lists, as [`arb_track`] does.
fn track_from(segments: Vec<Vec<(f64, f64, i64)>>) -> Track {
    let (mut lon, mut lat) = (-122.1, 37.4);
    let mut time = start();
    Track {
        name: None,
        segments: segments
            .into_iter()
            .map(|steps| Segment {
                points: steps
                    .into_iter()
                    .map(|(dlon, dlat, dt)| {
                        lon += dlon;
                        lat += dlat;
                        time += Duration::seconds(dt);
                        TrackPoint::new(lon, lat, None, time)
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[test]
fn test_zero_distance_has_no_splits() {
    let points = (0..20)
        .map(|i| TrackPoint::new(-122.1, 37.4, Some(30.0), start() + Duration::seconds(i * 10)))
        .collect();
    let splits = calculate_splits(&[Track::from_points(points)]).unwrap();
    assert!(splits.is_empty());
}

#[test]
fn test_short_walk_is_single_partial_split() {
    let tracks = vec![track_from(vec![vec![
        (0.0, 0.001, 30),
        (0.0, 0.001, 30),
        (0.001, 0.0, 30),
    ]])];
    let expected = total_distance(&tracks);
    assert!(expected < SPLIT_DISTANCE_METERS);

    let splits = calculate_splits(&tracks).unwrap();
    assert_eq!(splits.len(), 1);
    assert!((splits[0].distance - expected).abs() < 1e-9);
    assert_eq!(splits[0].split_time, 60.0);
}
