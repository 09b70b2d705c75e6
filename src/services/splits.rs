// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-kilometer split calculation.
//!
//! A single forward pass over consecutive point pairs. Pairs never span a
//! segment boundary. The running state (distance carried over and the start
//! of the open interval) lives in [`SplitAccumulator`], so the
//! threshold-crossing logic can be driven directly without building tracks.

use chrono::{DateTime, Utc};
use geo::{Distance, Haversine};

use crate::models::{Split, Track, TrackPoint};

/// Length of a full split in meters.
pub const SPLIT_DISTANCE_METERS: f64 = 1000.0;

/// Errors from split calculation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitError {
    #[error("Malformed track: timestamp {at} precedes {previous}")]
    MalformedTrack {
        previous: DateTime<Utc>,
        at: DateTime<Utc>,
    },
}

/// Running state of the split calculation.
#[derive(Debug, Default)]
pub struct SplitAccumulator {
    /// Meters accumulated in the open interval
    total_distance: f64,
    /// Timestamp at which the open interval started
    start_time: Option<DateTime<Utc>>,
    splits: Vec<Split>,
}

impl SplitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one pair of consecutive points covering `distance` meters.
    ///
    /// Emits a full split for every kilometer boundary crossed. A pair that
    /// crosses several boundaries attributes all of them to `end`.
    pub fn push(
        &mut self,
        start: &TrackPoint,
        end: &TrackPoint,
        distance: f64,
    ) -> Result<(), SplitError> {
        if end.time < start.time {
            return Err(SplitError::MalformedTrack {
                previous: start.time,
                at: end.time,
            });
        }

        let mut interval_start = *self.start_time.get_or_insert(start.time);
        // A segment may not start before the open interval did.
        if start.time < interval_start {
            return Err(SplitError::MalformedTrack {
                previous: interval_start,
                at: start.time,
            });
        }
        self.total_distance += distance;

        while self.total_distance >= SPLIT_DISTANCE_METERS {
            self.splits.push(Split::new(
                SPLIT_DISTANCE_METERS,
                seconds_between(interval_start, end.time),
                end.elevation_or_zero(),
            ));
            interval_start = end.time;
            self.total_distance -= SPLIT_DISTANCE_METERS;
        }
        self.start_time = Some(interval_start);

        Ok(())
    }

    /// Meters carried in the open interval.
    pub fn remainder(&self) -> f64 {
        self.total_distance
    }

    /// Close the calculation, emitting the partial final split measured
    /// against `last` if any distance remains.
    pub fn finish(mut self, last: Option<&TrackPoint>) -> Result<Vec<Split>, SplitError> {
        if self.total_distance <= 0.0 {
            return Ok(self.splits);
        }

        if let (Some(start_time), Some(last)) = (self.start_time, last) {
            if last.time < start_time {
                return Err(SplitError::MalformedTrack {
                    previous: start_time,
                    at: last.time,
                });
            }
            self.splits.push(Split::new(
                self.total_distance,
                seconds_between(start_time, last.time),
                last.elevation_or_zero(),
            ));
        }

        Ok(self.splits)
    }
}

/// Calculate per-kilometer splits over every track of a recording.
pub fn calculate_splits(tracks: &[Track]) -> Result<Vec<Split>, SplitError> {
    let accumulator = point_pairs(tracks).try_fold(
        SplitAccumulator::new(),
        |mut acc, (start, end)| -> Result<_, SplitError> {
            acc.push(start, end, distance_2d(start, end))?;
            Ok(acc)
        },
    )?;

    accumulator.finish(last_point(tracks))
}

/// Great-circle distance in meters between two points, ignoring elevation.
pub fn distance_2d(a: &TrackPoint, b: &TrackPoint) -> f64 {
    Haversine.distance(a.point, b.point)
}

/// Consecutive point pairs in recording order, segment by segment.
pub fn point_pairs(tracks: &[Track]) -> impl Iterator<Item = (&TrackPoint, &TrackPoint)> {
    tracks
        .iter()
        .flat_map(|t| t.segments.iter())
        .flat_map(|s| s.points.windows(2).map(|w| (&w[0], &w[1])))
}

/// The final point of the whole recording.
fn last_point(tracks: &[Track]) -> Option<&TrackPoint> {
    tracks
        .iter()
        .rev()
        .flat_map(|t| t.segments.iter().rev())
        .find_map(|s| s.points.last())
}

fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}
