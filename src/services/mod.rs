// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod recording;
pub mod splits;

pub use activity::{build_activity, ActivityProcessor, ProcessResult};
pub use recording::{parse_gpx, summarize, RecordingSummary};
pub use splits::{calculate_splits, SplitAccumulator, SplitError};
