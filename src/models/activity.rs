// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Running activity model for storage and API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Recording, Split};

/// Stored activity record, reconstructed from an `activities` row.
///
/// Serializes in PascalCase to match what the web UI reads from
/// `/gpx/{id}/detail`. The raw GPX and digest are served separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Activity {
    /// Row identity (not used for API addressing)
    #[serde(skip)]
    pub id: i64,
    /// Activity name/title
    pub name: String,
    /// When the row was created (storage-assigned)
    pub created: DateTime<Utc>,
    /// Total moving distance in meters
    pub distance: f64,
    /// Total duration in seconds
    #[serde(rename = "Time")]
    pub duration: f64,
    /// Completion date/time from the recording
    pub completed_date: Option<DateTime<Utc>>,
    /// Starting elevation in meters
    pub elevation: f64,
    /// Total elevation gain in meters
    pub uphill: f64,
    /// Total elevation loss in meters
    pub downhill: f64,
    /// Minutes per kilometer
    pub average_pace: f64,
    pub splits: Vec<Split>,
    /// Raw original GPX bytes
    #[serde(skip)]
    pub gpx: Vec<u8>,
    /// Hex SHA-256 of `gpx`
    #[serde(skip)]
    pub gpx_hash: String,
}

/// An activity ready for ingestion.
///
/// Carries the parsed recording alongside the raw bytes so the store can
/// derive splits without parsing again.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub name: String,
    pub completed_date: Option<DateTime<Utc>>,
    pub distance: f64,
    pub duration: f64,
    pub elevation: f64,
    pub uphill: f64,
    pub downhill: f64,
    pub average_pace: f64,
    pub gpx: Vec<u8>,
    pub recording: Recording,
}
