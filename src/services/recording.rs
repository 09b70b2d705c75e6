// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPX recording parsing and summary statistics.

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{Recording, Segment, Track, TrackPoint};
use crate::services::splits::{distance_2d, point_pairs};
use crate::time_utils::run_name_for;

/// Below this speed (m/s) a pair of points counts as stopped.
const STOPPED_SPEED_THRESHOLD: f64 = 1.0;

/// Parse raw GPX bytes into a [`Recording`].
///
/// Every track point must carry a timestamp.
pub fn parse_gpx(raw: &[u8]) -> Result<Recording, AppError> {
    let gpx = gpx::read(raw)
        .map_err(|e| AppError::InvalidRecording(format!("Failed to parse GPX: {}", e)))?;

    let (name, description, time) = match gpx.metadata {
        Some(metadata) => (
            metadata.name,
            metadata.description,
            metadata.time.and_then(to_utc),
        ),
        None => (None, None, None),
    };

    let tracks = gpx
        .tracks
        .into_iter()
        .enumerate()
        .map(|(track_idx, track)| -> Result<Track, AppError> {
            let segments = track
                .segments
                .into_iter()
                .enumerate()
                .map(|(segment_idx, segment)| -> Result<Segment, AppError> {
                    let points = segment
                        .points
                        .into_iter()
                        .enumerate()
                        .map(|(point_idx, waypoint)| -> Result<TrackPoint, AppError> {
                            let point = waypoint.point();
                            let time = waypoint.time.and_then(to_utc).ok_or_else(|| {
                                AppError::InvalidRecording(format!(
                                    "Track point {}/{}/{} has no valid timestamp",
                                    track_idx, segment_idx, point_idx
                                ))
                            })?;
                            Ok(TrackPoint::new(point.x(), point.y(), waypoint.elevation, time))
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Segment { points })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Track {
                name: track.name,
                segments,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Recording {
        name: non_empty(name),
        description: non_empty(description),
        time,
        tracks,
    })
}

fn to_utc(stamp: gpx::Time) -> Option<DateTime<Utc>> {
    let odt: time::OffsetDateTime = stamp.into();
    DateTime::from_timestamp(odt.unix_timestamp(), odt.nanosecond())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Aggregate figures derived from a recording.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSummary {
    /// Meters covered while moving
    pub moving_distance: f64,
    /// Seconds spent moving
    pub moving_time: f64,
    /// Seconds from first to last point, summed per segment
    pub duration: f64,
    /// Total elevation gain in meters
    pub uphill: f64,
    /// Total elevation loss in meters (positive)
    pub downhill: f64,
    /// Elevation of the very first point
    pub starting_elevation: f64,
}

impl RecordingSummary {
    /// Average pace in minutes per kilometer (0 when nothing moved).
    pub fn average_pace(&self) -> f64 {
        if self.moving_distance <= 0.0 {
            return 0.0;
        }
        (self.moving_time / (self.moving_distance / 1000.0)) / 60.0
    }
}

/// Compute summary figures for a recording.
pub fn summarize(recording: &Recording) -> RecordingSummary {
    let mut summary = RecordingSummary {
        starting_elevation: recording
            .first_point()
            .map(TrackPoint::elevation_or_zero)
            .unwrap_or(0.0),
        ..Default::default()
    };

    for (a, b) in point_pairs(&recording.tracks) {
        let elapsed = (b.time - a.time).num_milliseconds() as f64 / 1000.0;
        let distance = distance_2d(a, b);
        if elapsed > 0.0 && distance / elapsed >= STOPPED_SPEED_THRESHOLD {
            summary.moving_distance += distance;
            summary.moving_time += elapsed;
        }

        if let (Some(from), Some(to)) = (a.elevation, b.elevation) {
            let delta = to - from;
            if delta > 0.0 {
                summary.uphill += delta;
            } else {
                summary.downhill -= delta;
            }
        }
    }

    summary.duration = recording
        .tracks
        .iter()
        .flat_map(|t| t.segments.iter())
        .filter_map(|s| Some((s.points.first()?, s.points.last()?)))
        .map(|(first, last)| (last.time - first.time).num_milliseconds() as f64 / 1000.0)
        .sum();

    summary
}

/// When the recording finished being recorded: the file time, else the
/// first point's timestamp.
pub fn completion_date(recording: &Recording) -> Option<DateTime<Utc>> {
    recording
        .time
        .or_else(|| recording.first_point().map(|p| p.time))
}

/// Name for a recording: its own name, then the first track's name, then a
/// time-of-day default when the file carries no description either.
pub fn activity_name(recording: &Recording) -> String {
    let own_name = recording.name.clone().or_else(|| {
        recording
            .tracks
            .first()
            .and_then(|t| non_empty(t.name.clone()))
    });

    match own_name {
        Some(name) => name,
        None if recording.description.is_none() => completion_date(recording)
            .map(|time| run_name_for(time).to_string())
            .unwrap_or_default(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <metadata>
    <time>2024-04-20T17:45:00Z</time>
  </metadata>
  <trk>
    <trkseg>
      <trkpt lat="0.000" lon="0.0"><ele>10.0</ele><time>2024-04-20T17:45:00Z</time></trkpt>
      <trkpt lat="0.001" lon="0.0"><ele>12.0</ele><time>2024-04-20T17:45:30Z</time></trkpt>
      <trkpt lat="0.002" lon="0.0"><ele>11.0</ele><time>2024-04-20T17:46:00Z</time></trkpt>
      <trkpt lat="0.002" lon="0.0"><time>2024-04-20T17:47:00Z</time></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn test_parse_gpx_points() {
        let recording = parse_gpx(SAMPLE_GPX.as_bytes()).unwrap();
        assert_eq!(recording.tracks.len(), 1);
        assert_eq!(recording.tracks[0].segments[0].points.len(), 4);

        let first = recording.first_point().unwrap();
        assert_eq!(first.elevation, Some(10.0));
        assert_eq!(first.time, Utc.with_ymd_and_hms(2024, 4, 20, 17, 45, 0).unwrap());
        assert!(recording.tracks[0].segments[0].points[3].elevation.is_none());
        assert_eq!(
            recording.time,
            Some(Utc.with_ymd_and_hms(2024, 4, 20, 17, 45, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_gpx_rejects_garbage() {
        let err = parse_gpx(b"definitely not xml").unwrap_err();
        assert!(matches!(err, AppError::InvalidRecording(_)));
    }

    #[test]
    fn test_parse_gpx_requires_timestamps() {
        let gpx = SAMPLE_GPX.replace("<time>2024-04-20T17:46:00Z</time>", "");
        let err = parse_gpx(gpx.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::InvalidRecording(_)));
    }

    #[test]
    fn test_summary() {
        let recording = parse_gpx(SAMPLE_GPX.as_bytes()).unwrap();
        let summary = summarize(&recording);

        // The final pair is stationary and excluded from moving figures.
        assert_eq!(summary.moving_time, 60.0);
        assert!((summary.moving_distance - 222.39).abs() < 0.1);
        assert_eq!(summary.duration, 120.0);
        assert_eq!(summary.uphill, 2.0);
        assert_eq!(summary.downhill, 1.0);
        assert_eq!(summary.starting_elevation, 10.0);

        let pace = summary.average_pace();
        assert!((pace - 60.0 / 0.22239 / 60.0).abs() < 0.01);
    }

    #[test]
    fn test_average_pace_without_movement() {
        assert_eq!(RecordingSummary::default().average_pace(), 0.0);
    }

    #[test]
    fn test_name_defaults_to_time_of_day() {
        let recording = parse_gpx(SAMPLE_GPX.as_bytes()).unwrap();
        assert_eq!(activity_name(&recording), "Afternoon Run");
    }

    #[test]
    fn test_name_prefers_recording_then_track() {
        let mut recording = parse_gpx(SAMPLE_GPX.as_bytes()).unwrap();
        recording.tracks[0].name = Some("Track Name".to_string());
        assert_eq!(activity_name(&recording), "Track Name");

        recording.name = Some("Park Loop".to_string());
        assert_eq!(activity_name(&recording), "Park Loop");
    }

    #[test]
    fn test_description_suppresses_default_name() {
        let mut recording = parse_gpx(SAMPLE_GPX.as_bytes()).unwrap();
        recording.description = Some("Easy shakeout".to_string());
        assert_eq!(activity_name(&recording), "");
    }
}
