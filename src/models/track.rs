// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Parsed recording model: tracks, segments and timestamped points.

use chrono::{DateTime, Utc};
use geo::Point;

/// A single recorded position.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    /// Position (x = longitude, y = latitude)
    pub point: Point<f64>,
    /// Elevation in meters, if the device recorded one
    pub elevation: Option<f64>,
    /// Recorded timestamp
    pub time: DateTime<Utc>,
}

impl TrackPoint {
    pub fn new(lon: f64, lat: f64, elevation: Option<f64>, time: DateTime<Utc>) -> Self {
        Self {
            point: Point::new(lon, lat),
            elevation,
            time,
        }
    }

    /// Elevation with a missing value read as zero.
    pub fn elevation_or_zero(&self) -> f64 {
        self.elevation.unwrap_or(0.0)
    }
}

/// A contiguous run of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    pub points: Vec<TrackPoint>,
}

/// An ordered set of segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub name: Option<String>,
    pub segments: Vec<Segment>,
}

impl Track {
    /// Single-segment track, the common shape for watch recordings.
    pub fn from_points(points: Vec<TrackPoint>) -> Self {
        Self {
            name: None,
            segments: vec![Segment { points }],
        }
    }
}

/// A parsed recording as handed over by the GPX parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Recording time from the file metadata
    pub time: Option<DateTime<Utc>>,
    pub tracks: Vec<Track>,
}

impl Recording {
    /// Iterate over every point in recording order.
    pub fn points(&self) -> impl Iterator<Item = &TrackPoint> {
        self.tracks
            .iter()
            .flat_map(|t| t.segments.iter())
            .flat_map(|s| s.points.iter())
    }

    /// First point of the first segment of the first track.
    pub fn first_point(&self) -> Option<&TrackPoint> {
        self.tracks
            .first()
            .and_then(|t| t.segments.first())
            .and_then(|s| s.points.first())
    }
}
