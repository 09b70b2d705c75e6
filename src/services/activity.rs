// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity ingestion service.
//!
//! Handles the core workflow:
//! 1. Parse the raw GPX into a recording
//! 2. Summarize distance, time, elevation and pace
//! 3. Pick a name for the activity
//! 4. Store it, replacing any earlier upload of the same file

use crate::db::ActivityStore;
use crate::error::Result;
use crate::models::NewActivity;
use crate::services::recording::{activity_name, completion_date, parse_gpx, summarize};

/// Turns raw GPX uploads into stored activities.
pub struct ActivityProcessor {
    store: ActivityStore,
}

impl ActivityProcessor {
    pub fn new(store: ActivityStore) -> Self {
        Self { store }
    }

    /// Process and store one GPX recording.
    pub async fn process_gpx(&self, gpx: Vec<u8>) -> Result<ProcessResult> {
        let activity = build_activity(gpx)?;

        tracing::info!(
            name = %activity.name,
            distance = activity.distance,
            duration = activity.duration,
            points = activity.recording.points().count(),
            "Processing activity"
        );

        let digest = self.store.add(&activity).await?;

        Ok(ProcessResult {
            digest,
            name: activity.name,
            distance: activity.distance,
        })
    }
}

/// Result of processing an activity.
#[derive(Debug)]
pub struct ProcessResult {
    pub digest: String,
    pub name: String,
    pub distance: f64,
}

/// Build the ingestion record for a raw GPX file.
pub fn build_activity(gpx: Vec<u8>) -> Result<NewActivity> {
    let recording = parse_gpx(&gpx)?;
    let summary = summarize(&recording);

    Ok(NewActivity {
        name: activity_name(&recording),
        completed_date: completion_date(&recording),
        distance: summary.moving_distance,
        duration: summary.duration,
        elevation: summary.starting_elevation,
        uphill: summary.uphill,
        downhill: summary.downhill,
        average_pace: summary.average_pace(),
        gpx,
        recording,
    })
}
