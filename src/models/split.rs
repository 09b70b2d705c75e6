// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-kilometer split model.

use serde::{Deserialize, Serialize};

/// One interval of accumulated distance.
///
/// Field names are serialized in PascalCase; the same shape is used for the
/// stored splits blob and for the detail API consumed by the web UI.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Split {
    /// Meters covered in this interval (1000 except for the final remainder)
    pub distance: f64,
    /// Seconds between the interval's start and end points
    pub split_time: f64,
    /// Elevation of the interval's end point (meters)
    pub elevation: f64,
    /// Reserved, always zero
    pub heart_rate: f64,
}

impl Split {
    pub fn new(distance: f64, split_time: f64, elevation: f64) -> Self {
        Self {
            distance,
            split_time,
            elevation,
            heart_rate: 0.0,
        }
    }
}
